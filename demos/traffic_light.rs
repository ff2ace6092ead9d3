//! Pedestrian Traffic Light
//!
//! A traffic light that hands control to a nested pedestrian light while
//! pedestrians cross.
//!
//! Key concepts:
//! - Child transducers spawned, routed and despawned by the parent
//! - A filler state that holds until the child completes
//! - SQL, DOT and shortest-path artifacts from one table
//!
//! Run with: cargo run --example traffic_light
//! Set RUST_LOG=modal_transducer=debug to see each step logged.

use modal_transducer::builder::TransitionBuilder;
use modal_transducer::core::{Configuration, Transducer};
use modal_transducer::generate::{shortest_paths, to_digraph_with, to_sql, DotOptions};
use modal_transducer::session::Session;
use modal_transducer::{symbol_enum, BuildError, Symbol};
use tracing_subscriber::EnvFilter;

const PEDESTRIAN: &str = "pedestrian_light";

symbol_enum! {
    enum LightState {
        Invalid,
        Green,
        Yellow,
        PedestrianRed,
        Red,
    }
    invalid: Invalid
}

symbol_enum! {
    enum PedestrianState {
        Invalid,
        Stop,
        Walk,
        Blinking,
        Done,
    }
    invalid: Invalid
}

symbol_enum! {
    enum LightInput {
        Timer,
        PedestrianTimer,
    }
}

symbol_enum! {
    enum LightEffect {
        UpdateLightColor,
        UpdatePedestrianSymbol,
    }
}

type PedestrianLight = Transducer<PedestrianState, LightInput, LightEffect>;
type TrafficLight = Transducer<LightState, LightInput, LightEffect>;

fn pedestrian_light() -> Result<PedestrianLight, BuildError> {
    Transducer::builder(PEDESTRIAN)
        .transitions([
            TransitionBuilder::on(PedestrianState::Stop, LightInput::PedestrianTimer)
                .to(PedestrianState::Walk)
                .effect(LightEffect::UpdatePedestrianSymbol),
            TransitionBuilder::on(PedestrianState::Walk, LightInput::PedestrianTimer)
                .to(PedestrianState::Blinking)
                .effect(LightEffect::UpdatePedestrianSymbol),
            TransitionBuilder::on(PedestrianState::Blinking, LightInput::PedestrianTimer)
                .to(PedestrianState::Done)
                .effect(LightEffect::UpdatePedestrianSymbol),
        ])
        .build()
}

fn traffic_light() -> Result<TrafficLight, BuildError> {
    let crossing: Configuration<PedestrianState> = Configuration::new(PedestrianState::Stop);
    Transducer::builder("traffic_light")
        .child(pedestrian_light()?)
        .transitions([
            TransitionBuilder::on(LightState::Green, LightInput::Timer)
                .to(LightState::Yellow)
                .effect(LightEffect::UpdateLightColor),
            TransitionBuilder::on(LightState::Yellow, LightInput::Timer)
                .to(LightState::PedestrianRed)
                .effect(LightEffect::UpdateLightColor)
                .spawn(PEDESTRIAN, &crossing),
            TransitionBuilder::on(LightState::PedestrianRed, LightInput::PedestrianTimer)
                .to(LightState::Red)
                .route_until(PEDESTRIAN, PedestrianState::Done),
            TransitionBuilder::on(LightState::Red, LightInput::Timer)
                .to(LightState::Green)
                .effect(LightEffect::UpdateLightColor)
                .despawn(PEDESTRIAN),
        ])
        .build()
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== Pedestrian Traffic Light ===\n");

    let light = traffic_light()?;
    println!("{light:#?}\n");

    println!("--- Run ---");
    let mut session = Session::new(&light, Configuration::new(LightState::Green));
    let inputs = [
        LightInput::Timer,
        LightInput::Timer,
        LightInput::Timer,
        LightInput::PedestrianTimer,
        LightInput::PedestrianTimer,
        LightInput::PedestrianTimer,
        LightInput::Timer,
    ];
    for input in inputs {
        let from = session.state().clone();
        let effects = session.feed(input);
        let pedestrian = session
            .config()
            .child::<PedestrianState, ()>(PEDESTRIAN)
            .ok()
            .flatten()
            .map(|child| child.state.name().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<14} --{:<15}--> {:<14} pedestrian={:<9} effects={:?}",
            from.name(),
            input.name(),
            session.state().name(),
            pedestrian,
            effects
        );
    }
    println!("  {} recorded steps\n", session.history().len());

    println!("--- Shortest paths ---");
    let report = shortest_paths(&light);
    for ((from, to), path) in &report.paths {
        let names: Vec<&str> = path.iter().map(Symbol::name).collect();
        println!(
            "  {:>13} -> {:<13} {}",
            from.name(),
            to.name(),
            names.join(" -> ")
        );
    }

    println!("\n--- SQL ---");
    let (function, aggregate) = to_sql(&light, &LightState::Green).into_pair();
    println!("{function}\n{aggregate}");

    println!("--- DOT ---");
    let options = DotOptions {
        initial: Some(LightState::Green.name().to_string()),
        ..DotOptions::default()
    };
    println!("{}", to_digraph_with(&light, &options));

    println!("=== Example Complete ===");
    Ok(())
}
