use std::collections::HashSet;
use std::sync::Arc;

use gitsummarize::config::ProviderKeys;
use gitsummarize::keys::{mask_key, KeyGroup, KeyRotator};
use gitsummarize::KeyError;

#[test]
fn rotates_round_robin_without_end() {
    let mut rotator = KeyRotator::new();
    rotator.add_key(KeyGroup::OpenAi, "k1");
    rotator.add_key(KeyGroup::OpenAi, "k2");

    let draws: Vec<String> = (0..6)
        .map(|_| rotator.next_key(KeyGroup::OpenAi).expect("keys configured"))
        .collect();
    assert_eq!(draws, ["k1", "k2", "k1", "k2", "k1", "k2"]);
}

#[test]
fn adding_a_key_restarts_the_cycle() {
    let mut rotator = KeyRotator::new();
    rotator.add_key(KeyGroup::Gemini, "g1");
    rotator.add_key(KeyGroup::Gemini, "g2");
    assert_eq!(rotator.next_key(KeyGroup::Gemini).unwrap(), "g1");

    rotator.add_key(KeyGroup::Gemini, "g3");
    let draws: Vec<String> = (0..4).map(|_| rotator.next_key(KeyGroup::Gemini).unwrap()).collect();
    assert_eq!(draws, ["g1", "g2", "g3", "g1"]);
}

#[test]
fn groups_rotate_independently() {
    let mut rotator = KeyRotator::new();
    rotator.add_key(KeyGroup::OpenAi, "o1");
    rotator.add_key(KeyGroup::OpenAi, "o2");
    rotator.add_key(KeyGroup::Gemini, "g1");

    assert_eq!(rotator.next_key(KeyGroup::OpenAi).unwrap(), "o1");
    assert_eq!(rotator.next_key(KeyGroup::Gemini).unwrap(), "g1");
    assert_eq!(rotator.next_key(KeyGroup::OpenAi).unwrap(), "o2");
    assert_eq!(rotator.next_key(KeyGroup::Gemini).unwrap(), "g1");
}

#[test]
fn empty_group_is_a_configuration_error() {
    let rotator = KeyRotator::new();
    assert!(matches!(
        rotator.next_key(KeyGroup::Gemini),
        Err(KeyError::NoKeys(KeyGroup::Gemini))
    ));

    let err = rotator.require(&[KeyGroup::OpenAi]).unwrap_err();
    assert_eq!(err.to_string(), "no API keys configured for credential group 'openai'");
}

#[test]
fn require_passes_when_every_group_has_keys() {
    let rotator = KeyRotator::from_provider_keys(&ProviderKeys {
        groups: vec![
            (KeyGroup::OpenAi, vec!["o1".into()]),
            (KeyGroup::Gemini, vec!["g1".into(), "g2".into()]),
        ],
    });
    rotator.require(&KeyGroup::ALL).expect("both groups configured");
    assert_eq!(rotator.key_count(KeyGroup::Gemini), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_draws_only_return_configured_keys() {
    let mut rotator = KeyRotator::new();
    for key in ["a", "b", "c"] {
        rotator.add_key(KeyGroup::OpenAi, key);
    }
    let rotator = Arc::new(rotator);

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let rotator = Arc::clone(&rotator);
            tokio::spawn(async move { rotator.next_key(KeyGroup::OpenAi).unwrap() })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        seen.insert(handle.await.unwrap());
    }
    assert!(seen.iter().all(|key| ["a", "b", "c"].contains(&key.as_str())));
}

#[test]
fn debug_output_and_masking_hide_secrets() {
    let mut rotator = KeyRotator::new();
    rotator.add_key(KeyGroup::OpenAi, "sk-very-secret-key");
    assert!(!format!("{rotator:?}").contains("secret"));

    assert_eq!(mask_key("sk-very-secret-key"), "sk-v****");
    assert_eq!(mask_key("short"), "****");
}
