//! Raycast example
//!
//! Builds a small scene and sweeps a fan of rays across it, printing
//! the closest hit per ray.

use flatphy::prelude::*;

fn main() -> Result<(), ShapeError> {
    println!("FlatPhy - Ray Scan Example");
    println!("==========================\n");

    let mut world = World::default();

    // A circle, a box and a wall segment
    world.add_body(
        Body::new()
            .with_position(Vec2::new(4.0, 2.0))
            .with_fixture(Fixture::new(Shape::circle(1.0)?)),
    );
    world.add_body(
        Body::new()
            .with_position(Vec2::new(7.0, -1.0))
            .with_angle(0.4)
            .with_fixture(Fixture::new(Shape::rectangle(2.0, 1.0)?)),
    );
    world.add_body(
        Body::new().with_fixture(Fixture::new(Shape::segment(
            Vec2::new(10.0, -4.0),
            Vec2::new(10.0, 4.0),
        )?)),
    );

    // A sensor region the scan ignores
    world.add_body(
        Body::new()
            .with_position(Vec2::new(2.0, 0.0))
            .with_fixture(Fixture::new(Shape::circle(0.75)?).with_sensor(true)),
    );

    println!("Scene: circle at (4,2), rotated box at (7,-1), wall at x=10, sensor at (2,0)\n");

    // Fan of rays from the origin
    for i in -4..=4 {
        let angle = i as f64 * 0.15;
        let ray = Ray::from_angle(Vec2::ZERO, angle);

        match world.raycast_closest(&ray, 0.0, true) {
            Some(hit) => println!(
                "angle {:+.2}: hit body {:?} at ({:.2}, {:.2}), distance {:.3}",
                angle, hit.body, hit.point.x, hit.point.y, hit.distance
            ),
            None => println!("angle {:+.2}: no hit", angle),
        }
    }

    // All crossings along the x axis, sorted by distance
    let ray = Ray::new(Vec2::ZERO, Vec2::X)?;
    let mut all = world.raycast(&ray, 0.0, true, true);
    all.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());

    println!("\nAll crossings along +x:");
    for hit in &all {
        println!("  distance {:.3} on body {:?}", hit.distance, hit.body);
    }

    Ok(())
}
