//! Falling stack example
//!
//! Drops a small stack of boxes onto a static ground and prints their
//! positions while they settle.

use flatphy::prelude::*;

fn main() -> Result<(), ShapeError> {
    println!("FlatPhy - Falling Stack Example");
    println!("================================\n");

    let mut world = World::default();
    world.set_gravity(Vec2::new(0.0, -9.81));

    // Static ground (top surface at y = 0)
    let ground = Body::new()
        .with_position(Vec2::new(0.0, -0.5))
        .with_fixture(Fixture::new(Shape::rectangle(20.0, 1.0)?).with_friction(0.8));
    world.add_body(ground);
    println!("Created ground (top surface at y=0)");

    // A small stack of 1x1 boxes
    let mut boxes = Vec::new();
    for i in 0..4 {
        let body = Body::new()
            .with_position(Vec2::new(0.0, 1.0 + 1.2 * i as f64))
            .with_fixture(
                Fixture::new(Shape::rectangle(1.0, 1.0)?)
                    .with_friction(0.6)
                    .with_restitution(0.1),
            )
            .with_mass(MassType::Normal)
            .expect("boxes have positive density");
        boxes.push(world.add_body(body));
    }
    println!("Created a stack of {} boxes\n", boxes.len());

    let dt = 1.0 / 60.0;
    let total_time = 4.0;
    let steps = (total_time / dt) as usize;

    println!("Simulating {} seconds ({} steps at 60Hz)...\n", total_time, steps);

    for i in 0..steps {
        world.step(dt);

        if i % 60 == 0 {
            let t = i as f64 * dt;
            print!("t={:.1}s:", t);
            for &handle in &boxes {
                let pos = world.body(handle).unwrap().position;
                print!("  ({:.2}, {:.2})", pos.x, pos.y);
            }
            println!();
        }
    }

    println!("\nFinal box heights:");
    for (i, &handle) in boxes.iter().enumerate() {
        let body = world.body(handle).unwrap();
        println!(
            "  box {}: y={:.3}, speed={:.4}",
            i,
            body.position.y,
            body.linear_velocity.length()
        );
    }
    println!("Expected: boxes resting near y=0.5, 1.5, 2.5, 3.5");

    Ok(())
}
