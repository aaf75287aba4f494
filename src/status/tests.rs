use proptest::prelude::*;

use super::{StatusCategory, StatusCode, StatusInterpreter, Verdict, VerdictOptions};
use crate::error::Error;

const VALID: &[&str] = &["ok_for_all", "accept_all", "ok"];
const INVALID: &[&str] = &[
    "fail",
    "unknown_email",
    "smtp_error",
    "smtp_protocol",
    "attempt_rejected",
    "domain_error",
    "dead_server",
    "error",
];
const HARD_FAILURES: &[&str] = &[
    "antispam_system",
    "relay_error",
    "syntax_error",
    "incorrect",
    "key_not_valid",
    "missing_paramteres",
];

#[test]
fn valid_codes_count_once_each() {
    let mut interpreter = StatusInterpreter::default();
    for (n, status) in VALID.iter().enumerate() {
        let verdict = interpreter.interpret(status).expect("valid code");
        assert_eq!(verdict, Verdict::Valid, "{status}");
        assert_eq!(interpreter.request_count(), n as u64 + 1);
    }
}

#[test]
fn invalid_codes_count_once_each() {
    let mut interpreter = StatusInterpreter::default();
    for (n, status) in INVALID.iter().enumerate() {
        let verdict = interpreter.interpret(status).expect("invalid code");
        assert_eq!(verdict, Verdict::Invalid, "{status}");
        assert_eq!(interpreter.request_count(), n as u64 + 1);
    }
}

#[test]
fn ambiguous_codes_use_defaults() {
    let mut interpreter = StatusInterpreter::default();
    assert_eq!(interpreter.interpret("unknown").unwrap(), Verdict::Undetermined);
    assert_eq!(interpreter.interpret("disposable").unwrap(), Verdict::Valid);
    assert_eq!(interpreter.interpret("email_disabled").unwrap(), Verdict::Invalid);
    assert_eq!(interpreter.interpret("spam_traps").unwrap(), Verdict::Invalid);
    assert_eq!(interpreter.request_count(), 4);
}

#[test]
fn unknown_follows_configuration_changes() {
    let mut interpreter = StatusInterpreter::default();
    assert_eq!(interpreter.interpret("unknown").unwrap(), Verdict::Undetermined);

    interpreter.options_mut().unknown = Verdict::Valid;
    assert_eq!(interpreter.interpret("unknown").unwrap(), Verdict::Valid);

    interpreter.options_mut().unknown = Verdict::Invalid;
    assert_eq!(interpreter.interpret("unknown").unwrap(), Verdict::Invalid);
    assert_eq!(interpreter.request_count(), 3);
}

#[test]
fn configured_slots_are_honoured() {
    let options = VerdictOptions::default()
        .with_disposable(Verdict::Invalid)
        .with_not_exists(Verdict::Undetermined)
        .with_disabled(Verdict::Valid)
        .with_spam_trap(Verdict::Undetermined);
    let mut interpreter = StatusInterpreter::new(options);
    assert_eq!(interpreter.interpret("disposable").unwrap(), Verdict::Invalid);
    assert_eq!(interpreter.interpret("unknown_email").unwrap(), Verdict::Undetermined);
    assert_eq!(interpreter.interpret("email_disabled").unwrap(), Verdict::Valid);
    assert_eq!(interpreter.interpret("spam_traps").unwrap(), Verdict::Undetermined);
}

#[test]
fn strict_options_reject_ambiguous_categories() {
    let mut interpreter = StatusInterpreter::new(VerdictOptions::strict());
    assert_eq!(interpreter.interpret("unknown").unwrap(), Verdict::Invalid);
    assert_eq!(interpreter.interpret("disposable").unwrap(), Verdict::Invalid);
}

#[test]
fn key_not_valid_is_invalid_api_key_without_counting() {
    let mut interpreter = StatusInterpreter::default();
    let err = interpreter.interpret("key_not_valid").unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));
    assert_eq!(interpreter.request_count(), 0);
}

#[test]
fn hard_failures_map_to_distinct_errors() {
    let mut interpreter = StatusInterpreter::default();
    let errors: Vec<Error> = HARD_FAILURES
        .iter()
        .map(|status| interpreter.interpret(status).unwrap_err())
        .collect();

    assert!(matches!(errors[0], Error::AntiSpamBlocked));
    assert!(matches!(errors[1], Error::RelayError));
    assert!(matches!(&errors[2], Error::SyntaxError { status } if status == "syntax_error"));
    assert!(matches!(&errors[3], Error::SyntaxError { status } if status == "incorrect"));
    assert!(matches!(errors[4], Error::InvalidApiKey));
    assert!(matches!(errors[5], Error::NoValidationsRemaining));
    assert_eq!(interpreter.request_count(), 0);
}

#[test]
fn matching_is_case_sensitive() {
    let mut interpreter = StatusInterpreter::default();
    let err = interpreter.interpret("OK").unwrap_err();
    assert!(matches!(err, Error::UnknownStatus { ref status } if status == "OK"));
    assert_eq!(interpreter.request_count(), 0);
}

#[test]
fn vocabulary_round_trips_through_as_str() {
    let all: Vec<StatusCode> = StatusCode::all().collect();
    assert_eq!(all.len(), VALID.len() + INVALID.len() + HARD_FAILURES.len() + 4);
    for code in all {
        assert_eq!(StatusCode::parse(code.as_str()), Some(code));
        assert_eq!(code.counts(), code.category() != StatusCategory::HardFailure);
        assert_eq!(code.failure().is_some(), !code.counts());
    }
}

#[test]
fn resolve_does_not_count() {
    let interpreter = StatusInterpreter::default();
    assert_eq!(interpreter.resolve(StatusCode::Ok).unwrap(), Verdict::Valid);
    assert_eq!(interpreter.request_count(), 0);
}

proptest! {
    #[test]
    fn interpret_is_pure_but_counts_every_call(idx in 0usize..15, calls in 1usize..8) {
        let countable: Vec<&str> = VALID
            .iter()
            .chain(INVALID)
            .chain(["unknown", "disposable", "email_disabled", "spam_traps"].iter())
            .copied()
            .collect();
        let status = countable[idx % countable.len()];
        let mut interpreter = StatusInterpreter::default();
        let first = interpreter.interpret(status).unwrap();
        for _ in 1..calls {
            prop_assert_eq!(interpreter.interpret(status).unwrap(), first);
        }
        prop_assert_eq!(interpreter.request_count(), calls as u64);
    }

    #[test]
    fn tokens_outside_vocabulary_are_rejected(token in "[A-Za-z_]{0,24}") {
        prop_assume!(StatusCode::parse(&token).is_none());
        let mut interpreter = StatusInterpreter::default();
        let err = interpreter.interpret(&token).unwrap_err();
        let rejected = matches!(err, Error::UnknownStatus { .. });
        prop_assert!(rejected);
        prop_assert_eq!(interpreter.request_count(), 0);
    }
}
