//! Given steps for task board BDD scenarios.

use super::world::BoardWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{task::services::lock_store, weather::domain::WeatherReading};

#[given("an empty task board")]
fn empty_task_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    if !lock_store(&world.store).tasks().is_empty() {
        return Err(eyre::eyre!("expected a fresh board to hold no tasks"));
    }
    Ok(())
}

#[given(r#"the weather in "{location}" is "{description}""#)]
fn weather_is_scripted(
    world: &mut BoardWorld,
    location: String,
    description: String,
) -> Result<(), eyre::Report> {
    let reading = WeatherReading {
        description,
        temperature: 20.0,
        humidity: 55,
        wind_speed: 4.0,
    };
    world
        .lookup
        .set_weather(location, Ok(reading))
        .wrap_err("script weather lookup")
}
