// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Candidate emojis offered by the habit form's emoji picker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emoji {
    pub glyph: &'static str,
    /// Space-separated search words.
    pub keywords: &'static str,
}

const fn emoji(glyph: &'static str, keywords: &'static str) -> Emoji {
    Emoji { glyph, keywords }
}

pub const COMMON_EMOJIS: &[Emoji] = &[
    // health and fitness
    emoji("💪", "muscle strength gym workout exercise arm"),
    emoji("🏃", "run running jog exercise cardio"),
    emoji("🚴", "bike cycling ride exercise"),
    emoji("🏊", "swim swimming pool exercise"),
    emoji("🧘", "yoga meditate meditation calm mindfulness"),
    emoji("🏋️", "weights lifting gym workout"),
    emoji("🚶", "walk walking steps"),
    emoji("🤸", "stretch stretching gymnastics flexibility"),
    emoji("💧", "water drink hydrate droplet"),
    emoji("🥗", "salad healthy eat vegetables diet"),
    emoji("🍎", "apple fruit healthy eat"),
    emoji("🥦", "broccoli vegetable healthy eat"),
    emoji("💊", "pill medicine vitamins supplements"),
    emoji("🦷", "tooth teeth floss brush dental"),
    emoji("😴", "sleeping face sleep rest bed"),
    emoji("🛌", "bed sleep rest nap"),
    emoji("❤️", "heart love health"),
    emoji("🫁", "lungs breathe breathing"),
    // mind and learning
    emoji("📚", "books read reading study library"),
    emoji("📖", "book read reading open"),
    emoji("✍️", "write writing journal hand"),
    emoji("📝", "memo note notes journal write"),
    emoji("🧠", "brain think learn mind"),
    emoji("🎓", "graduation learn study school course"),
    emoji("🤓", "nerd face study learn glasses"),
    emoji("💡", "idea light bulb think"),
    emoji("🔬", "microscope science research"),
    emoji("🌍", "globe world language travel"),
    emoji("🗣️", "speaking head language talk practice"),
    emoji("🧩", "puzzle piece game think"),
    // work and productivity
    emoji("💻", "laptop computer code work"),
    emoji("⌨️", "keyboard type code"),
    emoji("📅", "calendar date plan schedule"),
    emoji("✅", "check done complete task"),
    emoji("🎯", "target goal focus aim"),
    emoji("⏰", "alarm clock time wake morning"),
    emoji("📈", "chart growth progress increase"),
    emoji("📧", "email inbox mail"),
    emoji("🗂️", "dividers organize files folder"),
    emoji("🧹", "broom clean tidy chores"),
    emoji("💰", "money bag save savings finance"),
    emoji("🏦", "bank finance money budget"),
    // hobbies
    emoji("🎸", "guitar music play instrument"),
    emoji("🎹", "piano keyboard music instrument"),
    emoji("🎨", "art paint painting palette draw"),
    emoji("📷", "camera photo photography"),
    emoji("🌱", "seedling plant grow garden"),
    emoji("🪴", "potted plant water garden"),
    emoji("🍳", "cooking cook egg kitchen"),
    emoji("🎮", "video game controller play"),
    emoji("♟️", "chess pawn strategy game"),
    emoji("🧶", "yarn knit knitting craft"),
    // people and feelings
    emoji("😀", "grinning face smile happy"),
    emoji("😊", "smiling face blush happy"),
    emoji("😎", "sunglasses face cool"),
    emoji("🥳", "partying face party celebrate"),
    emoji("😌", "relieved face calm relax"),
    emoji("🤔", "thinking face think reflect"),
    emoji("🙏", "pray gratitude thanks hands"),
    emoji("🤝", "handshake meet friends network"),
    emoji("👪", "family home together"),
    emoji("📞", "phone call telephone friends family"),
    // nature and misc
    emoji("☀️", "sun sunny morning outside"),
    emoji("🌙", "moon night evening"),
    emoji("⭐", "star favorite shine"),
    emoji("🔥", "fire streak hot lit"),
    emoji("🌳", "tree nature outside park"),
    emoji("🐕", "dog walk pet"),
    emoji("☕", "coffee tea cup morning"),
    emoji("🚭", "no smoking quit"),
    emoji("📵", "no phones screen detox offline"),
    emoji("🧊", "ice cold shower"),
];
