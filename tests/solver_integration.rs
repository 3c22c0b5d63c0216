//! Integration tests verifying that solved layouts satisfy the declared
//! constraints end to end: chained elements, guides, bias distribution,
//! auto-sized containers and content re-measurement.

use pretty_assertions::assert_eq;

use constraint_layout::{
    solve, ConstraintKind, Dimension, ElementDescriptor, FixedMeasurer, GuideDescriptor,
    LayoutError, LayoutSolver, Orientation, Rect, SolvedLayout, Target, Viewport,
};

fn rect(layout: &SolvedLayout, id: &str) -> Rect {
    *layout
        .get(id)
        .unwrap_or_else(|| panic!("element '{id}' not found in layout"))
}

#[test]
fn test_sidebar_content_split() {
    let elements = vec![
        ElementDescriptor::new("sidebar")
            .width(100.0)
            .height(Dimension::MatchParent)
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent),
        ElementDescriptor::new("content")
            .width(Dimension::zero())
            .height(Dimension::MatchParent)
            .constrain(ConstraintKind::LeftToRightOf, "sidebar")
            .constrain(ConstraintKind::RightToRightOf, Target::Parent),
    ];
    let layout = solve(&elements, &[], Viewport::fixed(300.0, 200.0)).unwrap();

    assert_eq!(rect(&layout, "sidebar"), Rect::new(0.0, 0.0, 100.0, 200.0));
    assert_eq!(rect(&layout, "content"), Rect::new(100.0, 0.0, 300.0, 200.0));
}

#[test]
fn test_three_element_horizontal_chain() {
    let elements = vec![
        ElementDescriptor::new("a")
            .width(60.0)
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent),
        ElementDescriptor::new("b")
            .width(60.0)
            .constrain(ConstraintKind::LeftToRightOf, "a"),
        ElementDescriptor::new("c")
            .width(Dimension::zero())
            .constrain(ConstraintKind::LeftToRightOf, "b")
            .constrain(ConstraintKind::RightToRightOf, Target::Parent),
    ];
    let layout = solve(&elements, &[], Viewport::fixed(300.0, 100.0)).unwrap();

    assert_eq!(rect(&layout, "b").x1, 60.0);
    assert_eq!(rect(&layout, "c").x1, 120.0);
    assert_eq!(rect(&layout, "c").x2, 300.0);
}

#[test]
fn test_guide_positions() {
    let guides = vec![
        GuideDescriptor::percent("half", Orientation::Vertical, 50.0),
        GuideDescriptor::end("inset", Orientation::Vertical, 20.0),
        GuideDescriptor::begin("top-rule", Orientation::Horizontal, 32.0),
    ];
    let elements = vec![
        ElementDescriptor::new("left-pane")
            .width(Dimension::zero())
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)
            .constrain(ConstraintKind::RightToLeftOf, "half"),
        ElementDescriptor::new("gutter")
            .width(Dimension::zero())
            .constrain(ConstraintKind::LeftToLeftOf, "half")
            .constrain(ConstraintKind::RightToLeftOf, "inset"),
        ElementDescriptor::new("below-rule")
            .height(10.0)
            .constrain(ConstraintKind::TopToTopOf, "top-rule"),
    ];
    let layout = solve(&elements, &guides, Viewport::fixed(300.0, 200.0)).unwrap();

    // percent = 50 in a 300-wide container -> x = 150
    assert_eq!(rect(&layout, "left-pane").x2, 150.0);
    // end = 20 -> x = 280
    assert_eq!(rect(&layout, "gutter").x2, 280.0);
    // begin = 32 -> y = 32
    assert_eq!(rect(&layout, "below-rule").y1, 32.0);
}

#[test]
fn test_vertical_bias_in_fixed_container() {
    let elements = vec![ElementDescriptor::new("badge")
        .width(40.0)
        .height(40.0)
        .vertical_bias(0.75)
        .constrain(ConstraintKind::TopToTopOf, Target::Parent)
        .constrain(ConstraintKind::BottomToBottomOf, Target::Parent)];
    let layout = solve(&elements, &[], Viewport::fixed(100.0, 240.0)).unwrap();

    // Slack is 200, bias 0.75 -> start at 150
    assert_eq!(rect(&layout, "badge").y1, 150.0);
    assert_eq!(rect(&layout, "badge").y2, 190.0);
}

#[test]
fn test_centering_between_siblings() {
    let elements = vec![
        ElementDescriptor::new("top-bar")
            .width(Dimension::MatchParent)
            .height(50.0)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent),
        ElementDescriptor::new("bottom-bar")
            .width(Dimension::MatchParent)
            .height(50.0)
            .constrain(ConstraintKind::BottomToBottomOf, Target::Parent),
        ElementDescriptor::new("dialog")
            .width(100.0)
            .height(100.0)
            .constrain(ConstraintKind::TopToBottomOf, "top-bar")
            .constrain(ConstraintKind::BottomToTopOf, "bottom-bar")
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)
            .constrain(ConstraintKind::RightToRightOf, Target::Parent),
    ];
    let layout = solve(&elements, &[], Viewport::fixed(400.0, 400.0)).unwrap();

    // The band between the bars is y in [50, 350]; a 100-high dialog
    // centered there starts at 150
    assert_eq!(rect(&layout, "dialog").y1, 150.0);
    assert_eq!(rect(&layout, "dialog").y2, 250.0);
    assert_eq!(rect(&layout, "dialog").x1, 150.0);
}

#[test]
fn test_overlap_with_negative_margin() {
    let elements = vec![
        ElementDescriptor::new("header")
            .width(Dimension::MatchParent)
            .height(80.0)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent),
        ElementDescriptor::new("avatar")
            .width(48.0)
            .height(48.0)
            .margins(0.0, -24.0, 0.0, 0.0)
            .constrain(ConstraintKind::TopToBottomOf, "header"),
    ];
    let layout = solve(&elements, &[], Viewport::fixed(300.0, 300.0)).unwrap();

    // The avatar straddles the header's bottom edge
    assert_eq!(rect(&layout, "avatar").y1, 56.0);
    assert_eq!(rect(&layout, "avatar").y2, 104.0);
}

#[test]
fn test_auto_height_with_percent_guide_converges() {
    // The horizontal guide depends on the container height, which is
    // itself derived from the elements; repeated height passes settle it
    let guides = vec![GuideDescriptor::percent("mid", Orientation::Horizontal, 50.0)];
    let elements = vec![
        ElementDescriptor::new("block")
            .width(Dimension::MatchParent)
            .height(200.0)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent),
        ElementDescriptor::new("marker")
            .width(20.0)
            .height(20.0)
            .constrain(ConstraintKind::TopToTopOf, "mid"),
    ];
    let layout = solve(&elements, &guides, Viewport::auto_height(300.0)).unwrap();

    assert_eq!(layout.container_height, 200.0);
    // After convergence the guide sits at half of the derived height
    assert_eq!(rect(&layout, "marker").y1, 100.0);
}

#[test]
fn test_text_reflow_grows_auto_container() {
    let mut measurer = FixedMeasurer::new();
    measurer.insert_reflowing("paragraph", 400.0, 50.0);

    let elements = vec![
        ElementDescriptor::new("rail")
            .width(100.0)
            .height(Dimension::MatchParent)
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent),
        ElementDescriptor::new("paragraph")
            .width(Dimension::zero())
            .height(Dimension::MatchContent)
            .constrain(ConstraintKind::LeftToRightOf, "rail")
            .constrain(ConstraintKind::RightToRightOf, Target::Parent)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent),
    ];
    let layout = LayoutSolver::with_measurer(&measurer)
        .solve(&elements, &[], Viewport::auto_height(300.0))
        .unwrap();

    // The paragraph narrows to 200, so its 400x50 natural block reflows
    // to height 100, which becomes the container height
    assert_eq!(rect(&layout, "paragraph").width(), 200.0);
    assert_eq!(rect(&layout, "paragraph").height(), 100.0);
    assert_eq!(layout.container_height, 100.0);
}

#[test]
fn test_match_content_width() {
    let mut measurer = FixedMeasurer::new();
    measurer.insert("label", 72.0, 16.0);

    let elements = vec![ElementDescriptor::new("label")
        .width(Dimension::MatchContent)
        .height(Dimension::MatchContent)
        .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)];
    let layout = LayoutSolver::with_measurer(&measurer)
        .solve(&elements, &[], Viewport::fixed(300.0, 100.0))
        .unwrap();

    assert_eq!(rect(&layout, "label").width(), 72.0);
    assert_eq!(rect(&layout, "label").height(), 16.0);
}

#[test]
fn test_anonymous_elements_get_stable_ids() {
    let elements = vec![
        ElementDescriptor::anonymous().width(10.0),
        ElementDescriptor::anonymous().width(20.0),
    ];
    let layout = solve(&elements, &[], Viewport::fixed(100.0, 100.0)).unwrap();

    let ids: Vec<&str> = layout.ids().collect();
    assert_eq!(ids, vec!["#anon-view-0", "#anon-view-1"]);
    assert_eq!(rect(&layout, "#anon-view-1").width(), 20.0);
}

#[test]
fn test_duplicate_id_produces_no_partial_layout() {
    let elements = vec![
        ElementDescriptor::new("box").width(10.0),
        ElementDescriptor::new("box").width(20.0),
    ];
    let result = solve(&elements, &[], Viewport::fixed(300.0, 200.0));

    match result {
        Err(LayoutError::DuplicateId { id }) => assert_eq!(id, "box"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn test_guide_with_two_rules_rejected() {
    let mut guide = GuideDescriptor::begin("g", Orientation::Vertical, 10.0);
    guide.percent = Some(50.0);
    let err = solve(&[], &[guide], Viewport::fixed(300.0, 200.0)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidGuideSpec { .. }));
}

#[test]
fn test_identical_inputs_solve_identically() {
    let mut measurer = FixedMeasurer::new();
    measurer.insert_reflowing("body", 500.0, 80.0);

    let guides = vec![GuideDescriptor::percent("mid", Orientation::Vertical, 40.0)];
    let elements = vec![
        ElementDescriptor::new("nav")
            .width(Dimension::zero())
            .height(Dimension::MatchParent)
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)
            .constrain(ConstraintKind::RightToLeftOf, "mid"),
        ElementDescriptor::new("body")
            .width(Dimension::zero())
            .height(Dimension::MatchContent)
            .constrain(ConstraintKind::LeftToLeftOf, "mid")
            .constrain(ConstraintKind::RightToRightOf, Target::Parent)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent),
    ];

    let solver = LayoutSolver::with_measurer(&measurer);
    let first = solver
        .solve(&elements, &guides, Viewport::auto_height(640.0))
        .unwrap();
    let second = solver
        .solve(&elements, &guides, Viewport::auto_height(640.0))
        .unwrap();

    assert_eq!(first, second);
}
