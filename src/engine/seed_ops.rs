pub fn parse_seed_input(input: &str) -> Result<Option<u32>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let normalized = trimmed.replace('_', "");
    normalized
        .parse::<u32>()
        .map(Some)
        .map_err(|_| "Seed must be an unsigned whole number (0 to 4294967295).".to_string())
}

pub fn msg_started_seed(seed: u32) -> String {
    format!("Started a new game. Seed {seed}.")
}

pub fn msg_repeated_seed(seed: u32) -> String {
    format!("Dealt again. Seed {seed}.")
}

pub fn msg_resumed_seed(seed: u32) -> String {
    format!("Resumed saved game. Seed {seed}.")
}
