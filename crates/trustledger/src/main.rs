//! `trustreg` - CLI for the trustledger member registry
//!
//! Each invocation opens the configured member database, drives one
//! [`ViewController`] session through the requested action and reports the
//! outcome.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::warn;

use trustledger::cli::{
    ApproveSchemeCommand, Cli, Command, ConfigCommand, DonateCommand, MembersCommand,
    RegisterCommand,
};
use trustledger::member::{today, Donation, Member, SchemeRecord};
use trustledger::view::{Action, Screen, ViewController};
use trustledger::{
    init_logging, initial_members, Config, MemberIdGenerator, MemberStore, Outcome, Storage,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Members(cmd) => handle_members(&config, cmd),
        Command::Register(cmd) => handle_register(&config, &cmd),
        Command::Donate(cmd) => handle_donate(&config, cmd),
        Command::ApproveScheme(cmd) => handle_approve_scheme(&config, cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("failed to open {}", path.display()))
}

fn open_session(storage: Storage, config: &Config) -> ViewController {
    let seed = if config.registry.seed_on_empty {
        initial_members()
    } else {
        Vec::new()
    };
    let slot = storage.into_slot(config.storage.slot_key.clone());
    ViewController::new(MemberStore::open(Box::new(slot), &seed))
}

fn notification(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Created { id } => format!("Member registered successfully. Member id: {id}"),
        Outcome::Updated { id } => format!("Member {id} updated."),
        Outcome::SchemeApproved { id } => format!("Scheme approved for member {id}."),
        Outcome::DonationRecorded { id } => format!("Donation recorded for member {id}."),
    }
}

fn report(view: &ViewController, outcome: &Outcome) {
    println!("{}", notification(outcome));
    if !view.store().is_persisted() {
        warn!("Changes could not be saved to {}", view.store().backend());
    }
}

fn print_member_row(member: &Member) {
    println!(
        "{:<6} {:<32} {:<14} {:<14} {:>10}",
        member.id,
        member.display_name(),
        member.city,
        member.role,
        member.total_donations()
    );
}

fn handle_members(config: &Config, cmd: MembersCommand) -> Result<()> {
    let view = open_session(open_storage(config)?, config);

    match cmd {
        MembersCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(view.members())?);
            } else {
                println!(
                    "{:<6} {:<32} {:<14} {:<14} {:>10}",
                    "ID", "NAME", "CITY", "ROLE", "DONATED"
                );
                for member in view.members() {
                    print_member_row(member);
                }
                println!();
                println!("{} members", view.member_count());
            }
        }
        MembersCommand::Show { id, json } => {
            let member = view
                .store()
                .find(&id)
                .ok_or_else(|| trustledger::Error::not_found(id.clone()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(member)?);
            } else {
                print_member(member);
            }
        }
    }
    Ok(())
}

fn print_member(member: &Member) {
    println!("Member {}", member.id);
    println!("----------");
    println!("Name:          {}", member.display_name());
    println!("City:          {}", member.city);
    println!("Role:          {}", member.role);
    println!(
        "Community:     {} ({})",
        member.community, member.sub_caste
    );
    println!("Gender:        {}", member.gender);
    println!("Marital:       {}", member.marital_status);
    println!("Registered:    {}", member.registration_date);
    println!("Fee:           {}", member.registration_fee);
    println!();
    println!("[Donations] total {}", member.total_donations());
    for donation in &member.donations {
        let sub = donation
            .sub_category
            .as_deref()
            .map(|s| format!(" / {s}"))
            .unwrap_or_default();
        println!(
            "  {}  {:>8}  {}{}",
            donation.date, donation.amount, donation.category, sub
        );
    }
    println!();
    println!("[Schemes] total {}", member.total_scheme_amount());
    for scheme in &member.schemes {
        println!(
            "  {}  {:>8}  {} ({})",
            scheme.date, scheme.amount, scheme.scheme_name, scheme.status
        );
    }
}

fn handle_register(config: &Config, cmd: &RegisterCommand) -> Result<()> {
    let mut view = open_session(open_storage(config)?, config);
    let new_member = cmd.new_member()?;

    let outcome = if let Some(edit_id) = &cmd.edit {
        view.dispatch(Action::Navigate(Screen::List))?;
        view.dispatch(Action::EditSelect {
            member_id: edit_id.clone(),
        })?;
        let existing = view
            .editing()
            .cloned()
            .ok_or_else(|| anyhow!("no member selected for editing"))?;

        let mut candidate =
            new_member.into_member(existing.id.clone(), existing.registration_date.clone());
        candidate.donations = existing.donations;
        candidate.schemes = existing.schemes;
        view.dispatch(Action::Register(Box::new(candidate)))?
    } else {
        let id = match &cmd.id {
            Some(id) => id.clone(),
            None => MemberIdGenerator::new(config.registry.id_attempts).next_id(view.store())?,
        };
        view.dispatch(Action::Navigate(Screen::Register))?;
        view.dispatch(Action::Register(Box::new(new_member.into_member(id, today()))))?
    };

    let outcome = outcome.context("registration produced no outcome")?;
    report(&view, &outcome);
    Ok(())
}

fn handle_donate(config: &Config, cmd: DonateCommand) -> Result<()> {
    let mut view = open_session(open_storage(config)?, config);

    let mut donation = Donation::new(cmd.amount, cmd.category, cmd.sub_category);
    if let Some(date) = cmd.date {
        donation = donation.on(date);
    }

    view.dispatch(Action::Navigate(Screen::Fund))?;
    let outcome = view
        .dispatch(Action::Donate {
            member_id: cmd.member_id,
            donation,
        })?
        .context("donation produced no outcome")?;

    report(&view, &outcome);
    println!("Trust fund total: {}", view.store().total_donations());
    Ok(())
}

fn handle_approve_scheme(config: &Config, cmd: ApproveSchemeCommand) -> Result<()> {
    let mut view = open_session(open_storage(config)?, config);

    let mut record = SchemeRecord::approved(cmd.scheme, cmd.amount, cmd.details);
    if let Some(date) = cmd.date {
        record = record.on(date);
    }

    view.dispatch(Action::Navigate(Screen::DikriYojana))?;
    let outcome = view
        .dispatch(Action::ApproveScheme {
            member_id: cmd.member_id,
            record,
        })?
        .context("scheme approval produced no outcome")?;

    report(&view, &outcome);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let view = open_session(storage, config);
    let store = view.store();
    let scheme_total = store.total_scheme_amount();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "slot_key": config.storage.slot_key,
            "members": store.len(),
            "total_donations": store.total_donations(),
            "total_scheme_amount": scheme_total,
            "snapshot_bytes": stats.total_value_bytes,
            "db_size_bytes": stats.db_size_bytes,
            "last_saved": stats.last_updated.map(|t| t.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("trustreg status");
        println!("---------------");
        println!("Database:      {}", config.database_path().display());
        println!("Slot:          {}", config.storage.slot_key);
        println!("Members:       {}", store.len());
        println!("Donations:     {}", store.total_donations());
        println!("Schemes:       {scheme_total}");
        match stats.last_updated {
            Some(t) => println!("Last saved:    {}", t.to_rfc3339()),
            None => println!("Last saved:    never (showing seed data)"),
        }
        println!("DB size:       {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[Registry]");
                println!("  Seed on empty:      {}", config.registry.seed_on_empty);
                println!("  Id attempts:        {}", config.registry.id_attempts);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
