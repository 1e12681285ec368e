use super::{RootMargin, SectionSpan, Viewport, ViewportObserver};
use crate::visibility::SectionId;

fn spans() -> Vec<SectionSpan> {
    vec![
        SectionSpan::new(SectionId::from("a"), 0, 10),
        SectionSpan::new(SectionId::from("b"), 10, 20),
        SectionSpan::new(SectionId::from("c"), 20, 40),
    ]
}

fn no_margin() -> RootMargin {
    RootMargin {
        top: 0.0,
        bottom: 0.0,
    }
}

#[test]
fn test_first_observation_reports_every_span() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let batch = observer.observe(Viewport {
        offset: 0,
        height: 10,
    });

    assert_eq!(batch.len(), 3);
    assert!(batch[0].is_intersecting);
    // Root is the top 60% of the viewport, so 6 of a's 10 rows count.
    assert!((batch[0].entry.intersection_ratio - 0.6).abs() < 1e-9);
    assert!(!batch[1].is_intersecting);
    assert!(!batch[2].is_intersecting);
}

#[test]
fn test_unchanged_viewport_reports_nothing() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let viewport = Viewport {
        offset: 0,
        height: 10,
    };
    let _ = observer.observe(viewport);
    assert!(observer.observe(viewport).is_empty());
}

#[test]
fn test_moving_sections_are_reported_and_hidden_ones_stay_quiet() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let _ = observer.observe(Viewport {
        offset: 0,
        height: 10,
    });

    // Root becomes rows [5, 11): a moves up, b starts intersecting, c stays out of view.
    let batch = observer.observe(Viewport {
        offset: 5,
        height: 10,
    });
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].id.as_str(), "a");
    assert!((batch[0].entry.intersection_ratio - 0.5).abs() < 1e-9);
    assert!((batch[0].entry.top - -5.0).abs() < 1e-9);
    assert!(batch[0].reached_threshold);
    assert_eq!(batch[1].id.as_str(), "b");
    assert!(batch[1].is_intersecting);
    assert!(!batch[1].reached_threshold);
    assert!((batch[1].entry.intersection_ratio - 0.1).abs() < 1e-9);
    assert!((batch[1].entry.top - 5.0).abs() < 1e-9);
}

#[test]
fn test_movement_within_a_threshold_band_is_reported() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let _ = observer.observe(Viewport {
        offset: 6,
        height: 10,
    });

    // a drops from 0.4 to 0.3 and b grows from 0.2 to 0.3, both below the 0.5 threshold.
    let batch = observer.observe(Viewport {
        offset: 7,
        height: 10,
    });
    let ids: Vec<&str> = batch.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!((batch[0].entry.intersection_ratio - 0.3).abs() < 1e-9);
    assert!((batch[1].entry.intersection_ratio - 0.3).abs() < 1e-9);
    assert!((batch[1].entry.top - 3.0).abs() < 1e-9);
}

#[test]
fn test_leaving_is_reported_once() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let _ = observer.observe(Viewport {
        offset: 0,
        height: 10,
    });
    let batch = observer.observe(Viewport {
        offset: 20,
        height: 10,
    });
    let a = batch.iter().find(|o| o.id.as_str() == "a").unwrap();
    assert!(!a.is_intersecting);

    let batch = observer.observe(Viewport {
        offset: 24,
        height: 10,
    });
    assert!(
        batch.iter().all(|o| o.id.as_str() == "c"),
        "Sections already out of view are not re-reported"
    );
}

#[test]
fn test_top_is_relative_to_viewport() {
    let observer = ViewportObserver::new(spans(), &[0.5], no_margin());
    let (entry, intersecting) = observer.measure(
        &observer.spans()[0],
        Viewport {
            offset: 4,
            height: 10,
        },
    );
    assert!(intersecting);
    assert!((entry.top - -4.0).abs() < 1e-9, "Scrolled-past sections sit above");
    assert!((entry.intersection_ratio - 0.6).abs() < 1e-9);
}

#[test]
fn test_section_fully_inside_root_has_full_ratio() {
    let observer = ViewportObserver::new(spans(), &[0.5], no_margin());
    let (entry, _) = observer.measure(
        &observer.spans()[1],
        Viewport {
            offset: 8,
            height: 15,
        },
    );
    assert!((entry.intersection_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn test_collapsed_root_intersects_nothing() {
    let margin = RootMargin {
        top: 0.0,
        bottom: -1.0,
    };
    let observer = ViewportObserver::new(spans(), &[0.5], margin);
    let (entry, intersecting) = observer.measure(
        &observer.spans()[0],
        Viewport {
            offset: 0,
            height: 10,
        },
    );
    assert!(!intersecting);
    assert!(entry.intersection_ratio.abs() < 1e-9);
}

#[test]
fn test_thresholds_are_normalised() {
    let observer = ViewportObserver::new(spans(), &[1.0, 0.5, 0.5, 2.0, -1.0], no_margin());
    assert_eq!(observer.thresholds(), &[0.0, 0.5, 1.0]);

    let observer = ViewportObserver::new(spans(), &[], no_margin());
    assert_eq!(observer.thresholds(), &[0.0]);
}

#[test]
fn test_reset_reports_everything_again() {
    let mut observer = ViewportObserver::new(spans(), &[0.5], RootMargin::default());
    let viewport = Viewport {
        offset: 0,
        height: 10,
    };
    let _ = observer.observe(viewport);
    observer.reset();
    assert_eq!(observer.observe(viewport).len(), 3);
}

#[test]
fn test_span_covers_at_least_one_row() {
    let span = SectionSpan::new(SectionId::from("tail"), 7, 7);
    assert_eq!(span.len(), 1);
    assert!(!span.is_empty());
}
