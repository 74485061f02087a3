//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, open_store, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::{
        FilterUpdate, Location, Priority, SortCriteria, SortField, SortOrder, StatusFilter,
        TaskDraft,
    },
    services::lock_store,
};

#[when(r#"I add the task "{text}" with priority "{priority}""#)]
fn add_task(world: &mut BoardWorld, text: String, priority: String) -> Result<(), eyre::Report> {
    let priority =
        Priority::try_from(priority.as_str()).wrap_err("parse priority from scenario")?;
    let draft = TaskDraft::new(text)
        .wrap_err("build task draft")?
        .with_priority(priority);
    lock_store(&world.store).add(draft);
    Ok(())
}

#[when(r#"I add the outdoor task "{text}" at "{location}""#)]
fn add_outdoor_task(
    world: &mut BoardWorld,
    text: String,
    location: String,
) -> Result<(), eyre::Report> {
    let location = Location::new(location).wrap_err("build location")?;
    let draft = TaskDraft::new(text)
        .wrap_err("build task draft")?
        .outdoor(location);
    let (_, outcome) = run_async(world.service.add_task(&world.store, draft));
    if outcome.is_none() {
        return Err(eyre::eyre!("expected a weather lookup for an outdoor task"));
    }
    Ok(())
}

#[when(r#"I remove the task "{text}""#)]
fn remove_task(world: &mut BoardWorld, text: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&text)?;
    if !lock_store(&world.store).remove(task.id()) {
        return Err(eyre::eyre!("task {text:?} was not removed"));
    }
    Ok(())
}

#[when(r#"I filter by status "{status}""#)]
fn filter_by_status(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let filter = StatusFilter::try_from(status).wrap_err("parse status filter")?;
    lock_store(&world.store).set_filter(FilterUpdate::Status(filter));
    Ok(())
}

#[when(r#"I sort by "{field}" in "{order}" order"#)]
fn sort_by(world: &mut BoardWorld, field: String, order: String) -> Result<(), eyre::Report> {
    let field = match field.as_str() {
        "createdAt" => SortField::CreatedAt,
        "priority" => SortField::Priority,
        other => return Err(eyre::eyre!("unsupported sort field {other:?}")),
    };
    let order = match order.as_str() {
        "asc" => SortOrder::Asc,
        "desc" => SortOrder::Desc,
        other => return Err(eyre::eyre!("unsupported sort order {other:?}")),
    };
    lock_store(&world.store).set_sort(SortCriteria::new(field, order));
    Ok(())
}

#[when(r#"another session adds the task "{text}""#)]
fn another_session_adds(world: &mut BoardWorld, text: String) -> Result<(), eyre::Report> {
    let mut other = open_store(&world.durable);
    other.add(TaskDraft::new(text).wrap_err("build task draft")?);
    Ok(())
}

#[when("the board reloads from storage")]
fn board_reloads(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    if !lock_store(&world.store).reload() {
        return Err(eyre::eyre!("expected a stored snapshot to reload"));
    }
    Ok(())
}
