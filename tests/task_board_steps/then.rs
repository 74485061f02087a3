//! Then steps for task board BDD scenarios.

use super::world::BoardWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::{
    task::{domain::TaskStatus, services::lock_store},
    weather::domain::WeatherOutcome,
};

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let found = lock_store(&world.store).tasks().len();
    if found != count {
        return Err(eyre::eyre!("expected {count} tasks, found {found}"));
    }
    Ok(())
}

#[then(r#"the task "{text}" is active and not completed"#)]
fn task_is_active(world: &BoardWorld, text: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&text)?;
    if task.status() != TaskStatus::Active || task.is_completed() {
        return Err(eyre::eyre!(
            "expected an active, open task, found status {} completed {}",
            task.status().as_str(),
            task.is_completed()
        ));
    }
    if task.weather().is_some() {
        return Err(eyre::eyre!("expected no weather on a new indoor task"));
    }
    Ok(())
}

#[then(r#"the "{column}" column lists "{text}""#)]
fn column_lists(world: &BoardWorld, column: String, text: String) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(column.as_str()).wrap_err("parse column")?;
    let store = lock_store(&world.store);
    let listed: Vec<&str> = store
        .column_tasks(status)
        .into_iter()
        .map(|task| task.text())
        .collect();
    if listed != [text.as_str()] {
        return Err(eyre::eyre!("expected column to list {text:?}, found {listed:?}"));
    }
    Ok(())
}

#[then("no tasks are visible")]
fn no_tasks_visible(world: &BoardWorld) -> Result<(), eyre::Report> {
    let visible = lock_store(&world.store).visible_tasks().len();
    if visible != 0 {
        return Err(eyre::eyre!("expected no visible tasks, found {visible}"));
    }
    Ok(())
}

#[then(r#"the task "{text}" carries the weather error "{message}""#)]
fn task_has_weather_error(
    world: &BoardWorld,
    text: String,
    message: String,
) -> Result<(), eyre::Report> {
    let task = world.task_named(&text)?;
    let error = task.weather().and_then(WeatherOutcome::error);
    if error != Some(message.as_str()) {
        return Err(eyre::eyre!(
            "expected weather error {message:?}, found {:?}",
            task.weather()
        ));
    }
    Ok(())
}

#[then(r#"the task "{text}" carries the weather "{description}""#)]
fn task_has_weather(
    world: &BoardWorld,
    text: String,
    description: String,
) -> Result<(), eyre::Report> {
    let task = world.task_named(&text)?;
    let found = task
        .weather()
        .and_then(WeatherOutcome::reading)
        .map(|reading| reading.description.as_str());
    if found != Some(description.as_str()) {
        return Err(eyre::eyre!(
            "expected weather {description:?}, found {:?}",
            task.weather()
        ));
    }
    Ok(())
}

#[then(r#"the visible tasks are "{expected}""#)]
fn visible_tasks_are(world: &BoardWorld, expected: String) -> Result<(), eyre::Report> {
    let store = lock_store(&world.store);
    let visible: Vec<&str> = store.visible_tasks().into_iter().map(|task| task.text()).collect();
    let wanted: Vec<&str> = expected.split(", ").collect();
    if visible != wanted {
        return Err(eyre::eyre!("expected {wanted:?}, found {visible:?}"));
    }
    Ok(())
}
