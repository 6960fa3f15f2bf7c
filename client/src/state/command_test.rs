use super::*;

// =============================================================
// parse
// =============================================================

#[test]
fn plain_text_is_not_a_command() {
    assert_eq!(MediaCommand::parse("Hello"), None);
    assert_eq!(MediaCommand::parse("/unknown"), None);
    assert_eq!(MediaCommand::parse(""), None);
}

#[test]
fn imagegen_is_case_insensitive_and_trimmed() {
    assert_eq!(
        MediaCommand::parse("/ImageGen   a sleepy cat  "),
        Some(MediaCommand::ImageGen { prompt: "a sleepy cat".into() })
    );
}

#[test]
fn imagegen_without_prompt_falls_through_to_chat() {
    assert_eq!(MediaCommand::parse("/imagegen    "), None);
    assert_eq!(MediaCommand::parse("/imagegen"), None);
}

#[test]
fn tts_parses_text() {
    assert_eq!(MediaCommand::parse("/TTS hello there"), Some(MediaCommand::Tts { text: "hello there".into() }));
}

#[test]
fn reactions_require_exact_match() {
    assert_eq!(MediaCommand::parse("/NEKO"), Some(MediaCommand::Reaction(Reaction::Neko)));
    assert_eq!(MediaCommand::parse("/dance"), Some(MediaCommand::Reaction(Reaction::Dance)));
    assert_eq!(MediaCommand::parse("/neko please"), None);
    assert_eq!(MediaCommand::parse(" /neko"), None);
}

#[test]
fn every_reaction_round_trips_through_its_name() {
    for reaction in Reaction::ALL {
        let input = format!("/{}", reaction.name());
        assert_eq!(MediaCommand::parse(&input), Some(MediaCommand::Reaction(reaction)));
    }
}

#[test]
fn multibyte_input_does_not_panic() {
    assert_eq!(MediaCommand::parse("🌸🌸🌸"), None);
    assert_eq!(MediaCommand::parse("/tts🌸"), None);
}

// =============================================================
// captions and requests
// =============================================================

#[test]
fn display_matches_issued_command() {
    assert_eq!(MediaCommand::ImageGen { prompt: "cat".into() }.display(), "/ImageGen cat");
    assert_eq!(MediaCommand::Tts { text: "hi".into() }.display(), "/tts hi");
    assert_eq!(MediaCommand::Reaction(Reaction::Hug).display(), "/hug");
}

#[test]
fn display_reparses_to_same_command() {
    let cmd = MediaCommand::ImageGen { prompt: "a fox".into() };
    assert_eq!(MediaCommand::parse(&cmd.display()), Some(cmd));
}

#[test]
fn tts_uses_audio_slot() {
    assert_eq!(MediaCommand::Tts { text: "x".into() }.slot(), MediaSlot::Audio);
    assert_eq!(MediaCommand::Reaction(Reaction::Pat).slot(), MediaSlot::Image);
}

#[test]
fn reaction_failure_text_names_command() {
    assert_eq!(
        MediaCommand::Reaction(Reaction::Poke).failure_text(),
        "Oops! Failed to get poke image. Please try again! 🌸"
    );
}

#[test]
fn requests_carry_the_right_fields() {
    let req = MediaCommand::Tts { text: "hi".into() }.request();
    assert_eq!(req.command, CommandKind::Tts);
    assert_eq!(req.text.as_deref(), Some("hi"));
    assert!(req.prompt.is_none());

    let req = MediaCommand::Reaction(Reaction::Wave).request();
    assert_eq!(req.command, CommandKind::Wave);
    assert!(req.prompt.is_none() && req.text.is_none());
}
