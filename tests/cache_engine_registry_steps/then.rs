//! Then steps for cache engine registry BDD scenarios.

use super::world::RegistryWorld;
use rstest_bdd_macros::then;
use serde_json::json;

#[then(r#""{alias}" is bound to a "{kind}""#)]
fn alias_bound_to(world: &RegistryWorld, alias: String, kind: String) -> Result<(), eyre::Report> {
    let handle = world
        .registry
        .get(&alias)
        .ok_or_else(|| eyre::eyre!("expected '{alias}' to be bound"))?;
    if handle.kind() != kind {
        return Err(eyre::eyre!(
            "expected '{alias}' to be a {kind}, found {}",
            handle.kind()
        ));
    }
    Ok(())
}

#[then(r#""{alias}" is not bound"#)]
fn alias_not_bound(world: &RegistryWorld, alias: String) -> Result<(), eyre::Report> {
    if world.registry.has(&alias) {
        return Err(eyre::eyre!("expected '{alias}' to be unbound"));
    }
    Ok(())
}

#[then(r#"the "{alias}" engine returns "{value}" for "{key}" after writing it"#)]
fn engine_round_trips(
    world: &RegistryWorld,
    alias: String,
    value: String,
    key: String,
) -> Result<(), eyre::Report> {
    let handle = world
        .registry
        .get(&alias)
        .ok_or_else(|| eyre::eyre!("expected '{alias}' to be bound"))?;
    let stored = handle
        .with_engine(|engine| {
            engine.write(&key, json!(value))?;
            engine.read(&key)
        })
        .map_err(|err| eyre::eyre!("engine lock failed: {err}"))?
        .map_err(|err| eyre::eyre!("engine access failed: {err}"))?;
    if stored != Some(json!(value)) {
        return Err(eyre::eyre!("expected {value:?}, read {stored:?}"));
    }
    Ok(())
}

#[then(r#"loading fails with "{message}""#)]
fn loading_fails_with(world: &RegistryWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_load
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing load result in scenario world"))?;
    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected failure '{message}', got {other:?}")),
    }
}
