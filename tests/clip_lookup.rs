use kickabout::plugins::models::pick_clip;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn exact_match_is_case_insensitive() {
    let clips = names(&["Death", "idle", "Running"]);
    assert_eq!(pick_clip(&clips, &["Idle", "Stand"]), Some(1));
}

#[test]
fn exact_match_beats_substring() {
    let clips = names(&["IdleLook", "Idle"]);
    assert_eq!(pick_clip(&clips, &["Idle"]), Some(1));
}

#[test]
fn falls_back_to_substring() {
    let clips = names(&["CharacterArmature|Run_Fast", "CharacterArmature|Death"]);
    assert_eq!(pick_clip(&clips, &["Run", "Walk"]), Some(0));
}

#[test]
fn earlier_candidates_win() {
    let clips = names(&["Walk", "Run"]);
    assert_eq!(pick_clip(&clips, &["Run", "Walk"]), Some(1));
}

#[test]
fn no_match_yields_none() {
    let clips = names(&["Death", "Wave"]);
    assert_eq!(pick_clip(&clips, &["Run", "Walk"]), None);
    assert_eq!(pick_clip(&[], &["Idle"]), None);
}
