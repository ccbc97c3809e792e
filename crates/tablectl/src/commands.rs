//! The command set wired into the example registry.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;

use tablectl_core::policy::{PolicyDocument, PolicyDocumentCondition, PolicyDocumentV4};
use tablectl_core::{
    CommandFn, CommandRegistry, Commands, Settings, TableAdmin, Usage, check_env_vars,
    cleanup_stale_tables, naming,
};

use crate::local::LocalTableAdmin;

/// Required by the `auto` command.
const PROJECT_ID_VAR: &str = "TABLECTL_PROJECT_ID";
const INSTANCE_ID_VAR: &str = "TABLECTL_INSTANCE_ID";

/// Name prefix for tables the `auto` command creates.
const AUTO_TABLE_PREFIX: &str = "auto-";

pub fn build_registry(settings: &Settings) -> Result<CommandRegistry> {
    let mut commands = Commands::new();

    let (name, command) = admin_command("create-table", &["<table-id>"], |admin, args| {
        admin.create_table(&args[0])?;
        println!("Created table {}", args[0]);
        Ok(())
    });
    commands.insert(name, command);

    let (name, command) = admin_command("list-tables", &[], |admin, _args| {
        for table in admin.list_table_names()? {
            println!("{table}");
        }
        Ok(())
    });
    commands.insert(name, command);

    let (name, command) = admin_command("delete-table", &["<table-id>"], |admin, args| {
        admin.delete_table(&args[0])?;
        println!("Deleted table {}", args[0]);
        Ok(())
    });
    commands.insert(name, command);

    let (name, command) = admin_command("cleanup-stale-tables", &["<prefix>"], |admin, args| {
        cleanup_stale_tables(admin, &args[0], Utc::now());
        println!("Swept stale '{}' tables", args[0]);
        Ok(())
    });
    commands.insert(name, command);

    let (name, command) = plain_command("new-table-id", &["<prefix>"], |args| {
        println!("{}", naming::random_table_id(&args[0]));
        Ok(())
    });
    commands.insert(name, command);

    let (name, command) = plain_command("show-policy", &["<bucket>", "<object>"], show_policy);
    commands.insert(name, command);

    let auto_settings = settings.clone();
    commands.insert(
        "auto".to_string(),
        Box::new(move |_args: &[String]| run_auto(&auto_settings)) as CommandFn,
    );

    CommandRegistry::new(commands)
}

/// Wraps a handler that needs a table admin.
///
/// The wrapped command takes `<project-id> <instance-id>` before its own
/// arguments, rejects any other argument count with a [`Usage`] error, and
/// opens the admin for the addressed instance before delegating.
fn admin_command<F>(
    name: &'static str,
    arg_names: &'static [&'static str],
    run: F,
) -> (String, CommandFn)
where
    F: Fn(&LocalTableAdmin, &[String]) -> Result<()> + 'static,
{
    const FIXED_ARGUMENTS: usize = 2;
    let command = move |argv: &[String]| -> Result<()> {
        if argv.len() != arg_names.len() + FIXED_ARGUMENTS {
            return Err(Usage(usage_line(name, &["<project-id>", "<instance-id>"], arg_names)).into());
        }
        let admin = LocalTableAdmin::open(&argv[0], &argv[1])?;
        run(&admin, &argv[FIXED_ARGUMENTS..])
    };
    (name.to_string(), Box::new(command))
}

/// Wraps a handler with no admin, still enforcing the argument count.
fn plain_command<F>(
    name: &'static str,
    arg_names: &'static [&'static str],
    run: F,
) -> (String, CommandFn)
where
    F: Fn(&[String]) -> Result<()> + 'static,
{
    let command = move |argv: &[String]| -> Result<()> {
        if argv.len() != arg_names.len() {
            return Err(Usage(usage_line(name, &[], arg_names)).into());
        }
        run(argv)
    };
    (name.to_string(), Box::new(command))
}

fn usage_line(name: &str, fixed: &[&str], arg_names: &[&str]) -> String {
    let mut usage = name.to_string();
    for arg in fixed.iter().chain(arg_names) {
        usage.push(' ');
        usage.push_str(arg);
    }
    usage
}

fn show_policy(args: &[String]) -> Result<()> {
    let bucket = &args[0];
    let object = &args[1];
    let now = Utc::now();
    let validity = Duration::minutes(15);

    let document = PolicyDocument {
        expiration: now + validity,
        conditions: vec![
            PolicyDocumentCondition::exact_match("bucket", bucket),
            PolicyDocumentCondition::starts_with("key", object),
            PolicyDocumentCondition::content_length_range(0, 1_000_000),
        ],
    };
    println!("{document}");

    let document = PolicyDocumentV4 {
        bucket: bucket.to_string(),
        object: object.to_string(),
        expiration: validity,
        timestamp: now,
        conditions: vec![PolicyDocumentCondition::content_length_range(0, 1_000_000)],
    };
    println!("{document}");
    Ok(())
}

/// Unattended run used by CI: sweep leaked tables, then exercise the admin
/// surface end to end with a throwaway table.
fn run_auto(settings: &Settings) -> Result<()> {
    check_env_vars(&[PROJECT_ID_VAR, INSTANCE_ID_VAR])?;
    if !settings.run_admin_examples() {
        info!("administrative examples are not enabled; skipping the auto run");
        return Ok(());
    }

    let project_id = std::env::var(PROJECT_ID_VAR)?;
    let instance_id = std::env::var(INSTANCE_ID_VAR)?;
    let admin = LocalTableAdmin::open(&project_id, &instance_id)?;

    cleanup_stale_tables(&admin, AUTO_TABLE_PREFIX, Utc::now());

    let table_id = naming::random_table_id(AUTO_TABLE_PREFIX);
    admin.create_table(&table_id)?;
    for table in admin.list_table_names()? {
        println!("{table}");
    }
    admin.delete_table(&table_id)?;
    Ok(())
}
