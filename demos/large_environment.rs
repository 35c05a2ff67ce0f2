//! Large environment stress example
//!
//! Hundreds of circles and rects, half of them fixed, bounce around a big
//! frictionless world partitioned by the quad-tree.
//!
//! Run with: cargo run --release --example large_environment

use std::time::Instant;

use rand::Rng;
use rustphy2d::prelude::*;

// World size in tiles
const TILE_SIZE: f64 = 24.0;
const TILES_WIDE: usize = 50;
const TILES_HIGH: usize = 50;

const NUM_BODIES: usize = 500;
const TICKS: usize = 600;

fn main() -> Result<()> {
    env_logger::init();

    let config = WorldConfig {
        width: TILES_WIDE as f64 * TILE_SIZE,
        height: TILES_HIGH as f64 * TILE_SIZE,
        options: WorldOptions {
            no_friction: true,
            use_quad_tree: true,
            quad_tree: QuadTreeOptions {
                max_bodies_in_leaf: 32,
                ..QuadTreeOptions::default()
            },
        },
    };
    let mut world = World::from_config(config)?;
    let mut rng = rand::thread_rng();

    let player = BodyDesc::circle(TILE_SIZE / 2.0)
        .with_position(Vec2::new(
            (TILES_WIDE / 2) as f64 * TILE_SIZE,
            (TILES_HIGH / 2) as f64 * TILE_SIZE,
        ))
        .with_elasticity(1.0)
        .with_name("player")
        .build()?;
    let player = world.add_body(player)?;

    let mut fixed = 0;
    for _ in 0..NUM_BODIES {
        let desc = if rng.gen_bool(0.5) {
            BodyDesc::circle(TILE_SIZE / 2.0)
        } else {
            BodyDesc::rect(TILE_SIZE, TILE_SIZE)
        };
        let tile = Vec2::new(
            rng.gen_range(0..TILES_WIDE) as f64,
            rng.gen_range(0..TILES_HIGH) as f64,
        );
        let desc = desc
            .with_position(tile * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0))
            .with_elasticity(1.0);

        let desc = if rng.gen_bool(0.5) {
            fixed += 1;
            desc.fixed()
        } else {
            desc.with_velocity(Vec2::new(rng.gen::<f64>(), rng.gen::<f64>()) * TILE_SIZE / 4.0)
        };
        world.add_body(desc.build()?)?;
    }

    println!("RustPhy2D - Large Environment Example");
    println!("=====================================\n");
    println!(
        "{} bodies ({} fixed) in a {}x{} world\n",
        world.num_bodies(),
        fixed,
        world.width(),
        world.height()
    );

    let start = Instant::now();
    for i in 0..TICKS {
        world.update();

        if i % 100 == 0 {
            let moving = world.bodies().iter().filter(|b| b.is_moving()).count();
            let tree = world.quad_tree();
            println!(
                "tick {:3}: {} moving, {} leaves, depth {}",
                world.tick(),
                moving,
                tree.map_or(0, QuadTree::leaf_count),
                tree.map_or(0, QuadTree::depth)
            );
        }
    }
    let elapsed = start.elapsed();

    println!(
        "\n{} ticks in {:.2?} ({:.3} ms per tick)",
        TICKS,
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / TICKS as f64
    );

    // bodies near the player at the end
    if let Some(position) = world.body(player).map(Body::position) {
        let nearby = world.bodies_intersecting(&Shape::circle(position, TILE_SIZE * 3.0));
        println!("player at ({:.1}, {:.1}) with {} bodies nearby", position.x, position.y, nearby.len().saturating_sub(1));
    }

    Ok(())
}
