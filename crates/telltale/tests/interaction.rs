use std::f64::consts::{PI, TAU};
use telltale::geometry::{Point, PolarVector, angular_distance};
use telltale::{
    Controller, ControllerSettings, Diagram, Key, PointerEvent, RingId, RingSeed, RingSpec,
    calculate_apparent_wind,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn point_at(diagram: &Diagram, angle: f64, radius: f64) -> Point {
    diagram
        .frame()
        .center()
        .offset(PolarVector::new(angle, radius).to_cartesian())
}

fn check_consistent(diagram: &Diagram) {
    for id in [RingId::Wind, RingId::Boat] {
        let ring = diagram.ring(id);
        assert!(ring.min_radius() <= ring.radius() && ring.radius() <= ring.max_radius());
        assert!((0.0..TAU).contains(&ring.angle()));
    }
    assert_eq!(
        diagram.apparent_wind(),
        calculate_apparent_wind(diagram.true_wind(), diagram.boat_vector())
    );
}

#[test]
fn test_full_gesture_sequence() {
    let mut diagram = Diagram::new(
        RingSeed::new(RingSpec::WIND, 0.0, 12.0),
        RingSeed::new(RingSpec::BOAT, 0.0, 6.0),
        900.0,
        700.0,
    );
    let controller = Controller::new(ControllerSettings {
        min_separation: 0.0,
        ..ControllerSettings::default()
    });

    // grab the wind ring and swing it to blow from astern of the boat
    let grab = point_at(&diagram, 0.0, diagram.wind_ring().radius());
    assert!(controller.handle_pointer(&mut diagram, PointerEvent::Down(grab)).redraw);
    let target = point_at(&diagram, PI, diagram.wind_ring().max_radius());
    controller.handle_pointer(&mut diagram, PointerEvent::Move(target));
    check_consistent(&diagram);

    assert!(close(diagram.wind_ring().angle(), PI));
    assert!(close(diagram.speed_of(RingId::Wind), 30.0));
    assert!(close(diagram.apparent_wind().speed, 36.0));

    // the pointer leaves the window and the release arrives elsewhere
    controller.handle_pointer(&mut diagram, PointerEvent::Up(Point::new(-50.0, -50.0)));
    assert!(!diagram.session().is_dragging());
    assert_eq!(diagram.selected(), Some(RingId::Wind));

    // keyboard follow-up on the same ring
    for _ in 0..36 {
        controller.handle_key(&mut diagram, Key::Right);
    }
    // half a turn further wraps back through zero
    assert!(angular_distance(diagram.wind_ring().angle(), 0.0) < 1e-6);
    controller.handle_key(&mut diagram, Key::Down);
    check_consistent(&diagram);

    // resize the window mid-session
    let angle = diagram.wind_ring().angle();
    controller.handle_resize(&mut diagram, 200.0, 150.0);
    assert_eq!(diagram.wind_ring().angle(), angle);
    check_consistent(&diagram);

    controller.handle_key(&mut diagram, Key::Escape);
    assert_eq!(diagram.selected(), None);
    assert!(!controller.handle_key(&mut diagram, Key::Up).redraw);
}

#[test]
fn test_degenerate_canvas_reads_calm() {
    let mut diagram = Diagram::new(
        RingSeed::new(RingSpec::WIND, 1.0, 20.0),
        RingSeed::new(RingSpec::BOAT, 2.0, 10.0),
        0.0,
        0.0,
    );
    check_consistent(&diagram);
    assert_eq!(diagram.speed_of(RingId::Wind), 0.0);
    assert_eq!(diagram.apparent_wind().speed, 0.0);

    diagram.update_canvas_dimensions(400.0, 400.0);
    check_consistent(&diagram);
}
