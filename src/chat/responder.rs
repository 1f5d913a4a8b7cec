// src/chat/responder.rs

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::knowledge::KnowledgeBase;

/// Generic replies used when no keyword group matches; one is chosen
/// uniformly at random.
const FALLBACK_REPLIES: [&str; 4] = [
    "🌟 That's a fascinating question, fellow space explorer! I love curiosity like yours. I can guide you through planets, stars, galaxies, black holes, space missions, and cosmic phenomena. What corner of the universe shall we explore together?",
    "✨ Excellent question! As your space guide, I'm here to help you discover the wonders of our universe - from tiny particles to massive galaxies, from Earth's backyard to the cosmic horizon. What cosmic mystery intrigues you most?",
    "🚀 Great question, space adventurer! I'm equipped with knowledge about planets, stellar evolution, space missions from NASA and ISRO, cosmic phenomena, and so much more. Let's embark on a journey through space and time - where would you like to start?",
    "🌌 I love your curiosity! The universe is full of incredible stories - from the birth of stars to the dance of galaxies, from robotic explorers on Mars to the search for life beyond Earth. What aspect of our cosmic story would you like me to share?",
];

/// Selects one canned response for `input`.
///
/// Keyword groups are tested in order against the lowercased input;
/// the first match wins. Topic handlers interpolate matching knowledge
/// base records when present and fall back to static paragraphs when
/// not. Deterministic for a fixed `{input, kb}` pair except the final
/// fallback tier, which draws from `rng`.
pub fn generate_response<R: Rng>(input: &str, kb: &KnowledgeBase, rng: &mut R) -> String {
    let q = input.to_lowercase();

    // Greeting and introduction
    if q.contains("hello") || q.contains("hi") || q.contains("cosmo") {
        return "Hello there, space explorer! 🚀 I'm Cosmo, your friendly AI space assistant! I'm here to guide you through the wonders of our incredible universe. What cosmic mystery would you like to explore today?".to_string();
    }

    // Planet-related questions. Bare planet names route here too, so
    // "Tell me about Mars" lands on the Mars branch instead of the
    // generic fallback tier.
    if q.contains("planet") || q.contains("mars") || q.contains("earth") || q.contains("jupiter") {
        return planet_response(&q, kb);
    }

    // Galaxy and cosmic structure questions
    if q.contains("galaxy") || q.contains("milky way") {
        return "🌌 Galaxies are island universes of stars! Our home, the Milky Way, contains over 200 billion stars and is spiraling through space at 600 km/s! We're neighbors with Andromeda Galaxy, which is speeding toward us for a cosmic collision in 4.5 billion years - don't worry, it'll be spectacular, not destructive!".to_string();
    }

    // Stars and stellar phenomena
    if q.contains("star") || q.contains("sun") || q.contains("supernova") {
        return "⭐ Stars are cosmic furnaces where hydrogen becomes helium, creating the light and energy that powers our universe! Our Sun is a middle-aged star that's been shining for 4.6 billion years. When massive stars die, they explode as supernovas - cosmic fireworks that scatter elements needed for planets and life!".to_string();
    }

    // Black holes
    if q.contains("black hole") {
        return "🕳️ Black holes are the universe's ultimate mysteries! These cosmic vacuum cleaners have gravity so strong that nothing - not even light - can escape. But here's the mind-bending part: they're not actually holes, they're incredibly dense objects that warp spacetime itself! The supermassive black hole at our galaxy's center is 4 million times heavier than our Sun!".to_string();
    }

    // Big Bang and cosmology
    if q.contains("big bang") || q.contains("universe") {
        return "💥 The Big Bang wasn't an explosion in space - it was an explosion OF space! 13.8 billion years ago, our entire universe started smaller than a dot and expanded faster than light. Today, we can still detect the afterglow of that moment as cosmic microwave background radiation. Mind-blowing, right?".to_string();
    }

    // Exoplanets
    if q.contains("exoplanet") || q.contains("other worlds") {
        return "🪐 Exoplanets are worlds beyond our solar system, and we've discovered over 5,000 of them! Some orbit in the 'habitable zone' where liquid water could exist. The James Webb Space Telescope is analyzing their atmospheres, searching for signs of life. We might not be alone in this vast cosmic ocean!".to_string();
    }

    // Mission-related questions
    if q.contains("mission") || q.contains("isro") || q.contains("nasa") || q.contains("chandrayaan")
    {
        return mission_response(&q, kb);
    }

    // ISS questions
    if q.contains("iss") || q.contains("space station") {
        return "🛰️ The International Space Station is humanity's outpost in space! Orbiting 408 km above us at 28,000 km/h, it completes one orbit every 90 minutes. Astronauts conduct incredible experiments in microgravity that help us understand everything from medicine to materials science. You can track it live in our Live Tracker - wave when it passes over! 👋".to_string();
    }

    // Space exploration general
    if q.contains("space") || q.contains("exploration") {
        return "🚀 Space exploration is humanity's greatest adventure! From Sputnik's first beep to rovers on Mars, from lunar footsteps to images from the edge of the observable universe - we're constantly pushing the boundaries of what's possible. Every mission teaches us something new about our cosmic neighborhood and our place in it!".to_string();
    }

    // Quiz questions
    if q.contains("quiz") || q.contains("test") {
        return "🧠 Ready to test your cosmic knowledge? Our interactive quiz has mind-bending questions about planets, missions, and space phenomena! Challenge yourself and see how much you've learned about our amazing universe. Head to the Quiz section and let's see if you're ready for astronaut training! 🎯".to_string();
    }

    FALLBACK_REPLIES
        .choose(rng)
        .map(|s| s.to_string())
        .unwrap_or_else(|| FALLBACK_REPLIES[0].to_string())
}

fn planet_response(q: &str, kb: &KnowledgeBase) -> String {
    if q.contains("mars") {
        return match kb.find_planet("mars") {
            Some(mars) => format!(
                "🔴 Mars - The Red Planet! {} Fun fact: Mars has the largest volcano in our solar system - Olympus Mons, which is 3 times taller than Mount Everest! {} away, Mars continues to fascinate us with its potential for past life.",
                mars.description, mars.distance_from_earth
            ),
            None => "🔴 Mars - The Red Planet! This fascinating world is our celestial neighbor, with rusty iron oxide giving it that distinctive red color. Mars has polar ice caps, massive canyons, and evidence of ancient rivers. Could it have harbored life? That's what we're trying to discover!".to_string(),
        };
    }
    if q.contains("earth") {
        return match kb.find_planet("earth") {
            Some(earth) => format!(
                "🌍 Earth - Our Beautiful Blue Marble! {} What makes Earth special? It's in the perfect 'Goldilocks Zone' - not too hot, not too cold, but just right for liquid water and life to flourish!",
                earth.description
            ),
            None => "🌍 Earth - Our Beautiful Blue Marble! The only known planet with life, Earth is a cosmic oasis with vast oceans, diverse ecosystems, and a protective atmosphere. We're incredibly lucky to call this spinning rock our home!".to_string(),
        };
    }
    if q.contains("jupiter") {
        return match kb.find_planet("jupiter") {
            Some(jupiter) => format!(
                "🪐 Jupiter - The King of Planets! {} This gas giant acts as our solar system's protector, using its massive gravity to deflect asteroids and comets away from Earth. It has over 80 moons, including the four amazing Galilean moons!",
                jupiter.description
            ),
            None => "🪐 Jupiter - The King of Planets! This massive gas giant could fit all other planets inside it! With its Great Red Spot (a storm larger than Earth) and 80+ moons, Jupiter is like a mini solar system of its own.".to_string(),
        };
    }

    let names: Vec<&str> = kb.planets.iter().map(|p| p.name.as_str()).collect();
    let listing = if names.is_empty() {
        "Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, Neptune".to_string()
    } else {
        names.join(", ")
    };
    format!(
        "Our solar system family has 8 incredible planets: {}. Each one tells a unique story of cosmic evolution! Which planet's secrets would you like me to reveal? 🌟",
        listing
    )
}

fn mission_response(q: &str, kb: &KnowledgeBase) -> String {
    if q.contains("chandrayaan") {
        return match kb.find_mission_containing("chandrayaan") {
            Some(m) => {
                let date = m
                    .mission_date
                    .map(|d| d.format("%-d %B %Y").to_string())
                    .unwrap_or_else(|| "an undisclosed date".to_string());
                format!(
                    "🇮🇳 {} - India's incredible lunar achievement! Launched by {} on {}. {} This mission made India the fourth country to soft-land on the Moon and the first to reach the lunar south pole!",
                    m.name, m.agency, date, m.description
                )
            }
            None => "🇮🇳 Chandrayaan-3 - India's historic Moon mission! This incredible achievement made India the first nation to successfully land near the Moon's south pole, where water ice might be hiding in permanently shadowed craters. A proud moment for space exploration!".to_string(),
        };
    }
    if q.contains("isro") {
        let names: Vec<&str> = kb
            .missions_by_agency("ISRO")
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        let listing = if names.is_empty() {
            "Chandrayaan-3, Mangalyaan, Aditya-L1".to_string()
        } else {
            names.join(", ")
        };
        return format!(
            "🇮🇳 ISRO (Indian Space Research Organisation) is doing amazing work! Their missions include: {}. From Mars missions to lunar landings, ISRO proves that great science knows no boundaries. Which mission would you like to explore?",
            listing
        );
    }

    let highlights: Vec<String> = kb
        .missions
        .iter()
        .take(3)
        .map(|m| format!("{} ({})", m.name, m.agency))
        .collect();
    let listing = if highlights.is_empty() {
        "Chandrayaan-3 (ISRO), Artemis I (NASA), Mangalyaan (ISRO)".to_string()
    } else {
        highlights.join(", ")
    };
    format!(
        "🚀 Space missions are humanity's greatest adventures! Here are some incredible journeys: {}. Each mission expands our cosmic horizon and inspires the next generation of explorers!",
        listing
    )
}
