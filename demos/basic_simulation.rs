//! Basic physics simulation example
//!
//! A ball rolls into a fixed block, bounces back and slows down under
//! friction. Run with `RUST_LOG=trace` to see every contact.

use rustphy2d::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("RustPhy2D - Basic Simulation Example");
    println!("====================================\n");

    let mut world = World::new(400.0, 200.0, WorldOptions::default())?;

    // A fixed block in the middle of the world
    let block = BodyDesc::rect(24.0, 120.0)
        .with_position(Vec2::new(300.0, 100.0))
        .with_elasticity(1.0)
        .with_name("block")
        .fixed()
        .build()?;
    world.add_body(block)?;
    println!("Created block spanning x=288..312");

    // A ball heading for it
    let mut ball = BodyDesc::circle(12.0)
        .with_position(Vec2::new(40.0, 100.0))
        .with_velocity(Vec2::new(60.0, 0.0))
        .with_elasticity(0.8)
        .with_name("ball")
        .build()?;
    ball.on_collision(|contact: &Contact| {
        println!(
            "  contact: {} -> {} at t={:.3} ({:?})",
            contact.moving, contact.other, contact.time, contact.feature
        );
    });
    let ball = world.add_body(ball)?;
    println!("Created ball at x=40 moving right at 60 units per tick\n");

    for _ in 0..30 {
        world.update();

        if let Some(body) = world.body(ball) {
            let pos = body.position();
            let vel = body.velocity();
            println!(
                "tick {:2}: position=({:.3}, {:.3}), velocity=({:.3}, {:.3})",
                world.tick(),
                pos.x,
                pos.y,
                vel.x,
                vel.y
            );
        }
    }

    if let Some(body) = world.body(ball) {
        println!("\nFinal ball position: ({:.3}, {:.3})", body.position().x, body.position().y);
        println!("Ball at rest: {}", !body.is_moving());
    }

    Ok(())
}
