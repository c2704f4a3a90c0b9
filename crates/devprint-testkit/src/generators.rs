//! Proptest generators for property-based testing.

use proptest::prelude::*;

use devprint_probes::ScreenInfo;

use crate::fixtures::{
    AudioFault, CanvasFault, FakeAudio, FakeCanvas, FakeDisplay, FakeFonts, FakeGraphics,
    FakeNavigator, FixedClock, SimulatedClock, SimulatedEnvironment, FIXED_NOW,
};

/// Generate any string, surrogate pairs included.
pub fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,64}",
        any::<String>(),
        prop::collection::vec(prop::char::range('\u{1F300}', '\u{1F6FF}'), 0..8)
            .prop_map(|chars| chars.into_iter().collect()),
    ]
}

/// Generate plausible screen geometry.
pub fn screen() -> impl Strategy<Value = ScreenInfo> {
    (
        320u32..=7680,
        240u32..=4320,
        prop::sample::select(vec![8u32, 16, 24, 30, 32, 48]),
        0u32..=200,
    )
        .prop_map(|(width, height, depth, taskbar)| ScreenInfo {
            width,
            height,
            color_depth: depth,
            pixel_depth: depth,
            avail_width: width,
            avail_height: height.saturating_sub(taskbar),
        })
}

/// Generate a navigator with optional fields present or absent.
pub fn navigator() -> impl Strategy<Value = FakeNavigator> {
    (
        text(),
        prop::option::of("[a-z]{2}-[A-Z]{2}"),
        prop::option::of(prop::sample::select(vec![
            "Linux x86_64".to_string(),
            "Win32".to_string(),
            "MacIntel".to_string(),
            "iPhone".to_string(),
        ])),
        prop::option::of(1u32..=128),
        prop::option::of(prop::sample::select(vec![0.25f64, 0.5, 1.0, 2.0, 4.0, 8.0])),
        any::<bool>(),
        prop::option::of(0u32..=10),
        prop::collection::vec(("[A-Za-z ]{1,20}", "[a-z-]{0,20}"), 0..4),
        any::<bool>(),
    )
        .prop_map(
            |(ua, language, platform, cores, memory, touch, points, plugins, blocked)| {
                let plugins: Vec<(&str, &str)> = plugins
                    .iter()
                    .map(|(n, v)| (n.as_str(), v.as_str()))
                    .collect();
                let nav = FakeNavigator {
                    user_agent: ua,
                    language,
                    platform,
                    hardware_concurrency: cores,
                    device_memory: memory,
                    touch_events: touch,
                    max_touch_points: points,
                    plugins: Ok(vec![]),
                }
                .with_plugins(&plugins);
                if blocked {
                    nav.with_blocked_plugins()
                } else {
                    nav
                }
            },
        )
}

/// Generate a canvas that works, faults at some step, or is absent.
pub fn canvas() -> impl Strategy<Value = Option<FakeCanvas>> {
    prop_oneof![
        Just(None),
        "[a-z-]{1,12}".prop_map(|r| Some(FakeCanvas::new(&r))),
        prop::sample::select(vec![
            CanvasFault::CreateBlocked,
            CanvasFault::DrawFails,
            CanvasFault::ReadbackBlocked,
        ])
        .prop_map(|f| Some(FakeCanvas::failing(f))),
    ]
}

/// Generate any 3D capability state.
pub fn graphics() -> impl Strategy<Value = Option<FakeGraphics>> {
    prop_oneof![
        Just(None),
        Just(Some(FakeGraphics::NoContext)),
        Just(Some(FakeGraphics::Throws)),
        Just(Some(FakeGraphics::LostContext)),
        ("[A-Za-z ]{1,16}", "[A-Za-z ]{1,16}", any::<bool>()).prop_map(|(v, r, unmasked)| {
            Some(FakeGraphics::Context {
                vendor: "WebKit".into(),
                renderer: "WebKit WebGL".into(),
                version: "WebGL 1.0".into(),
                unmasked: unmasked.then_some((v, r)),
            })
        }),
    ]
}

/// Generate an audio backend that works, faults at some step, or is absent.
pub fn audio() -> impl Strategy<Value = Option<FakeAudio>> {
    prop_oneof![
        Just(None),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(|s| Some(FakeAudio::new(s))),
        prop::sample::select(vec![
            AudioFault::OpenFails,
            AudioFault::ConnectFails,
            AudioFault::SampleFails,
        ])
        .prop_map(|f| Some(FakeAudio::failing(f))),
    ]
}

/// Generate font metrics with a random installed set, broken, or absent.
pub fn fonts() -> impl Strategy<Value = Option<FakeFonts>> {
    let installed = prop::sample::subsequence(
        vec!["Arial", "Verdana", "Georgia", "Impact", "Tahoma", "Courier New"],
        0..=6,
    )
    .prop_flat_map(|names| {
        let n = names.len();
        (Just(names), prop::collection::vec(100.0f64..1000.0, n))
    })
    .prop_map(|(names, widths)| {
        let pairs: Vec<(&str, f64)> = names.into_iter().zip(widths).collect();
        Some(FakeFonts::new(&pairs))
    });
    prop_oneof![Just(None), Just(Some(FakeFonts::broken())), installed]
}

/// Generate a whole environment, including broken clocks.
pub fn environment() -> impl Strategy<Value = SimulatedEnvironment> {
    (
        screen(),
        navigator(),
        prop::option::of(0i64..=FIXED_NOW * 2),
        -720i32..=840,
        canvas(),
        graphics(),
        audio(),
        fonts(),
    )
        .prop_map(
            |(screen, navigator, now, offset, canvas, graphics, audio, fonts)| {
                SimulatedEnvironment {
                    display: FakeDisplay(screen),
                    navigator,
                    clock: SimulatedClock::Fixed(FixedClock {
                        now,
                        offset_minutes: offset,
                    }),
                    canvas,
                    graphics,
                    audio,
                    fonts,
                }
            },
        )
}
