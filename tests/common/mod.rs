//! The pedestrian traffic light used across integration tests.

#![allow(dead_code)]

use modal_transducer::builder::TransitionBuilder;
use modal_transducer::core::{Configuration, Transducer};
use modal_transducer::symbol_enum;

pub const PEDESTRIAN: &str = "pedestrian_light";

symbol_enum! {
    pub enum LightState {
        Invalid,
        Green,
        Yellow,
        PedestrianRed,
        Red,
    }
    invalid: Invalid
}

symbol_enum! {
    pub enum PedestrianState {
        Invalid,
        Stop,
        Walk,
        Blinking,
        Done,
    }
    invalid: Invalid
}

symbol_enum! {
    pub enum LightInput {
        Timer,
        PedestrianTimer,
    }
}

symbol_enum! {
    pub enum LightEffect {
        UpdateLightColor,
        UpdatePedestrianSymbol,
    }
}

pub type TrafficLight = Transducer<LightState, LightInput, LightEffect>;
pub type PedestrianLight = Transducer<PedestrianState, LightInput, LightEffect>;

pub fn pedestrian_light() -> PedestrianLight {
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
        .expect("pedestrian light is valid")
}

pub fn traffic_light() -> TrafficLight {
    Transducer::builder("traffic_light")
        .child(pedestrian_light())
        .transitions([
            TransitionBuilder::on(LightState::Green, LightInput::Timer)
                .to(LightState::Yellow)
                .effect(LightEffect::UpdateLightColor),
            TransitionBuilder::on(LightState::Yellow, LightInput::Timer)
                .to(LightState::PedestrianRed)
                .effect(LightEffect::UpdateLightColor)
                .spawn(PEDESTRIAN, &pedestrian_at(PedestrianState::Stop)),
            // PedestrianRed is a filler state: it only ends once the crossing is done.
            TransitionBuilder::on(LightState::PedestrianRed, LightInput::PedestrianTimer)
                .to(LightState::Red)
                .route_until(PEDESTRIAN, PedestrianState::Done),
            TransitionBuilder::on(LightState::Red, LightInput::Timer)
                .to(LightState::Green)
                .effect(LightEffect::UpdateLightColor)
                .despawn(PEDESTRIAN),
        ])
        .build()
        .expect("traffic light is valid")
}

pub fn pedestrian_at(state: PedestrianState) -> Configuration<PedestrianState> {
    Configuration::new(state)
}
