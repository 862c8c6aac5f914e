/// Uses per day for feats with a daily limit.
///
/// Battle Medicine's real limit is once per day per patient; it is tracked
/// as a single daily use for the character.
pub fn daily_limit(feat_id: &str) -> Option<u32> {
    match feat_id {
        "halfling-luck" => Some(1),
        "battle-medicine" => Some(1),
        "otherworldly-acumen" => Some(1),
        "first-world-adept" => Some(1),
        _ => None,
    }
}
