//! End-to-end scenarios on simulated devices.

use devprint::{
    fold_hash, FingerprintConfig, Fingerprinter, Identifier, ProbeOutcome, Sentinel, Signal,
};
use devprint_testkit::{
    AudioFault, CanvasFault, FakeAudio, FakeCanvas, FakeFonts, FakeGraphics, FixedClock,
    SimulatedEnvironment, FIXED_NOW,
};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

#[tokio::test]
async fn test_locked_down_host_yields_sentinels_and_numeric_id() {
    let fp = Fingerprinter::with_defaults(SimulatedEnvironment::minimal().capabilities())
        .generate()
        .await;

    assert!(!fp.is_fallback());
    assert!(fp.identifier.as_hash().is_some());
    assert!(fp.mapping.is_complete());
    assert_eq!(
        fp.mapping.failed_signals(),
        vec![
            Signal::CanvasHash,
            Signal::WebglHash,
            Signal::AudioHash,
            Signal::FontsHash,
            Signal::PluginsHash,
        ]
    );
    assert_eq!(
        fp.mapping.get(Signal::CanvasHash),
        Some(&ProbeOutcome::Failed(Sentinel::CanvasUnavailable))
    );
    assert_eq!(
        fp.mapping.get(Signal::WebglHash),
        Some(&ProbeOutcome::Failed(Sentinel::WebglUnavailable))
    );
    assert_eq!(
        fp.mapping.get(Signal::AudioHash),
        Some(&ProbeOutcome::Failed(Sentinel::AudioUnavailable))
    );
}

#[tokio::test]
async fn test_desktop_collects_every_signal() {
    let env = SimulatedEnvironment::desktop();
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;

    assert!(!fp.is_fallback());
    assert!(fp.mapping.failed_signals().is_empty());
    assert_eq!(fp.mapping.len(), Signal::ALL.len());
    let signals: Vec<Signal> = fp.mapping.iter().map(|(s, _)| s).collect();
    assert_eq!(signals, Signal::ALL.to_vec());
}

#[tokio::test]
async fn test_one_failing_probe_leaves_others_intact() {
    let healthy = SimulatedEnvironment::desktop();
    let mut broken = healthy.clone();
    broken.canvas = Some(FakeCanvas::failing(CanvasFault::ReadbackBlocked));

    let a = Fingerprinter::with_defaults(healthy.capabilities()).generate().await;
    let b = Fingerprinter::with_defaults(broken.capabilities()).generate().await;

    assert_eq!(
        b.mapping.get(Signal::CanvasHash),
        Some(&ProbeOutcome::Failed(Sentinel::CanvasUnavailable))
    );
    for signal in Signal::ALL {
        if signal != Signal::CanvasHash {
            assert_eq!(a.mapping.get(signal), b.mapping.get(signal), "{signal}");
        }
    }
    assert_ne!(a.identifier, b.identifier);
}

#[tokio::test]
async fn test_webgl_fault_kinds() {
    let cases = [
        (None, Sentinel::WebglUnavailable),
        (Some(FakeGraphics::NoContext), Sentinel::WebglUnavailable),
        (Some(FakeGraphics::Throws), Sentinel::WebglError),
        (Some(FakeGraphics::LostContext), Sentinel::WebglError),
    ];
    for (graphics, expected) in cases {
        let mut env = SimulatedEnvironment::desktop();
        env.graphics = graphics;
        let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;
        assert_eq!(fp.mapping.get(Signal::WebglHash), Some(&ProbeOutcome::Failed(expected)));
        assert!(!fp.is_fallback());
    }
}

#[tokio::test]
async fn test_audio_released_on_every_path() {
    let backends = [
        FakeAudio::new((0..64).collect()),
        FakeAudio::failing(AudioFault::OpenFails),
        FakeAudio::failing(AudioFault::ConnectFails),
        FakeAudio::failing(AudioFault::SampleFails),
    ];
    for audio in backends {
        let mut env = SimulatedEnvironment::desktop();
        env.audio = Some(audio.clone());
        let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;

        let lifecycle = audio.lifecycle();
        assert!(lifecycle.all_released(), "{lifecycle:?}");
        match audio.fault {
            None => assert!(fp.mapping.get(Signal::AudioHash).unwrap().is_signal()),
            Some(_) => assert_eq!(
                fp.mapping.get(Signal::AudioHash),
                Some(&ProbeOutcome::Failed(Sentinel::AudioError))
            ),
        }
    }
}

#[tokio::test]
async fn test_audio_signal_uses_leading_bins() {
    let spectrum: Vec<u8> = (0..64).collect();
    let mut env = SimulatedEnvironment::desktop();
    env.audio = Some(FakeAudio::new(spectrum.clone()));
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;

    let joined: String = spectrum[..30].iter().map(|b| b.to_string()).collect();
    assert_eq!(fp.mapping.text(Signal::AudioHash), fold_hash(&joined).to_string());
}

#[tokio::test]
async fn test_font_probe_reports_only_installed_candidates() {
    let mut env = SimulatedEnvironment::desktop();
    env.fonts = Some(FakeFonts::new(&[("Verdana", 600.0), ("Not A Candidate", 700.0)]));
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;
    assert_eq!(fp.mapping.text(Signal::FontsHash), fold_hash("Verdana").to_string());

    env.fonts = Some(FakeFonts::new(&[]));
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;
    assert_eq!(fp.mapping.text(Signal::FontsHash), "0");

    env.fonts = Some(FakeFonts::broken());
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;
    assert_eq!(fp.mapping.text(Signal::FontsHash), "fonts_error");
}

#[tokio::test]
async fn test_plugins_registry_states() {
    let env = SimulatedEnvironment::desktop();
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;
    let expected =
        fold_hash("PDF Viewer|internal-pdf-viewer|Chrome PDF Viewer|internal-pdf-viewer")
            .to_string();
    assert_eq!(fp.mapping.text(Signal::PluginsHash), expected);

    let mut blocked = env.clone();
    blocked.navigator = blocked.navigator.with_blocked_plugins();
    let fp = Fingerprinter::with_defaults(blocked.capabilities()).generate().await;
    assert_eq!(fp.mapping.text(Signal::PluginsHash), "plugins_error");
}

#[tokio::test]
async fn test_broken_clock_falls_back_with_partial_mapping() {
    let env = SimulatedEnvironment::desktop().with_clock(FixedClock::broken(60));
    let fp = Fingerprinter::with_defaults(env.capabilities()).generate().await;

    assert!(fp.is_fallback());
    assert_eq!(fp.identifier.as_hash(), None);
    // The host's own clock dates the fallback when the capability clock is broken.
    let Identifier::Fallback { generated_at } = fp.identifier else {
        panic!("expected a fallback, got {}", fp.identifier);
    };
    assert!(generated_at > FIXED_NOW);
    assert_eq!(fp.identifier.to_string(), format!("fallback_{generated_at}"));
    assert_eq!(fp.mapping.len(), Signal::ALL.len() - 1);
    assert!(fp.mapping.get(Signal::Timestamp).is_none());
    assert_eq!(fp.mapping.text(Signal::TimezoneOffset), "60");
}

#[tokio::test]
async fn test_stable_identifier_ignores_generation_time() {
    let env = SimulatedEnvironment::desktop().with_ticking_clock(FIXED_NOW, 1_000);
    let fingerprinter = Fingerprinter::with_defaults(env.capabilities());

    let first = fingerprinter.generate().await;
    let second = fingerprinter.generate().await;

    assert_ne!(first.identifier, second.identifier);
    assert_eq!(
        fingerprinter.stable_identifier(&first.mapping).unwrap(),
        fingerprinter.stable_identifier(&second.mapping).unwrap()
    );
    assert_eq!(
        fingerprinter.layered_digests(&first.mapping),
        fingerprinter.layered_digests(&second.mapping)
    );
}

#[tokio::test]
async fn test_layered_digests_track_their_signals() {
    let env = SimulatedEnvironment::desktop();
    let fingerprinter = Fingerprinter::with_defaults(env.capabilities());
    let base = fingerprinter.layered_digests(&fingerprinter.generate().await.mapping);

    // Audio is in neither layer.
    let mut quiet = env.clone();
    quiet.audio = None;
    let f = Fingerprinter::with_defaults(quiet.capabilities());
    let same = f.layered_digests(&f.generate().await.mapping);
    assert_eq!(base, same);

    // Canvas is advanced-only.
    let mut flat = env.clone();
    flat.canvas = None;
    let f = Fingerprinter::with_defaults(flat.capabilities());
    let changed = f.layered_digests(&f.generate().await.mapping);
    assert_eq!(base.basic, changed.basic);
    assert_ne!(base.advanced, changed.advanced);
    assert_ne!(base.combined, changed.combined);
}

#[tokio::test]
async fn test_custom_delimiter_changes_identifier() {
    let env = SimulatedEnvironment::minimal();
    let config = FingerprintConfig::from_json(r#"{"delimiter": ";"}"#).unwrap();
    let fingerprinter = Fingerprinter::new(env.capabilities(), config).unwrap();
    let fp = fingerprinter.generate().await;

    let expected = fold_hash(&fp.mapping.serialize_values(';').unwrap());
    assert_eq!(fp.identifier, Identifier::Hash(expected));
}

#[test]
fn test_hand_built_config_is_validated() {
    let env = SimulatedEnvironment::minimal();
    let mut config = FingerprintConfig::default();
    config.probes.font_baselines.clear();
    assert!(Fingerprinter::new(env.capabilities(), config).is_err());
}

mod properties {
    use super::*;
    use devprint_testkit::generators::environment;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Whatever the host offers or breaks, generation yields an
        /// identifier and a mapping in declared order.
        #[test]
        fn generate_never_fails(env in environment()) {
            let fp = block_on(Fingerprinter::with_defaults(env.capabilities()).generate());
            let clock_works = matches!(
                &env.clock,
                devprint_testkit::SimulatedClock::Fixed(c) if c.now.is_some()
            );
            prop_assert_eq!(fp.is_fallback(), !clock_works);
            prop_assert_eq!(fp.mapping.is_complete(), clock_works);

            let order: Vec<usize> = fp.mapping.iter().map(|(s, _)| s.index()).collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }

        /// Same device, same clock: same identifier.
        #[test]
        fn generation_is_deterministic(env in environment()) {
            let a = block_on(Fingerprinter::with_defaults(env.capabilities()).generate());
            let b = block_on(Fingerprinter::with_defaults(env.capabilities()).generate());
            prop_assert_eq!(a, b);
        }

        /// The composite is the fold hash of the serialized mapping.
        #[test]
        fn identifier_folds_serialized_mapping(env in environment()) {
            let fp = block_on(Fingerprinter::with_defaults(env.capabilities()).generate());
            if let Identifier::Hash(h) = fp.identifier {
                prop_assert_eq!(h, fold_hash(&fp.mapping.serialize_values('|').unwrap()));
            }
        }
    }
}
