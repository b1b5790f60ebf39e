//! Handlers for the ledger commands: add, delete, list, summary, categories.

use chrono::NaiveDate;

use crate::cli::commands::{kinds_filter, parse_kind, usage_error};
use crate::cli::core::{CommandError, ShellContext};
use crate::cli::format::{
    category_option, empty_message, format_amount, list_title, record_line, signed_amount,
};
use crate::cli::output;
use crate::core::{AddOutcome, DeleteOutcome};
use crate::ledger::{BalanceStatus, TransactionId};

pub(crate) fn add(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let (kind, description, amount) = match args {
        [kind, description, amount, ..] => (parse_kind(kind)?, *description, *amount),
        _ => return Err(usage_error("add")),
    };
    let amount: f64 = amount.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("Amount `{amount}` is not a number"))
    })?;
    let default_category = kind.default_category();
    let category = args.get(3).copied().unwrap_or(default_category.as_str());
    let date = match args.get(4) {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    match context
        .store
        .add_transaction(kind, description, amount, category, date)
    {
        AddOutcome::Added { id, warning } => {
            let symbol = &context.config.currency_symbol;
            output::success(format!(
                "Added {kind} #{id}: {} ({})",
                description.trim(),
                signed_amount(symbol, kind, amount)
            ));
            if let Some(warning) = warning {
                output::warning(warning);
            }
        }
        AddOutcome::Rejected(reason) => {
            output::warning(format!("Transaction not added: {reason}"));
        }
    }
    Ok(())
}

pub(crate) fn delete(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let (kind, raw_id) = match args {
        [kind, id] => (parse_kind(kind)?, *id),
        _ => return Err(usage_error("delete")),
    };
    let id: TransactionId = raw_id
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw_id}` is not a valid id")))?;

    match context.store.delete_transaction(id, kind) {
        DeleteOutcome::Removed { record, warning } => {
            output::success(format!("Deleted {kind} #{id}: {}", record.description));
            if let Some(warning) = warning {
                output::warning(warning);
            }
        }
        DeleteOutcome::NotFound => output::info(format!("No {kind} with id {id}.")),
    }
    Ok(())
}

pub(crate) fn list(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let symbol = &context.config.currency_symbol;
    for kind in kinds_filter(args)? {
        output::section(list_title(kind));
        let records = context.store.records(kind);
        if records.is_empty() {
            output::line(empty_message(kind));
            continue;
        }
        for record in records {
            output::line(record_line(symbol, kind, record));
        }
    }
    Ok(())
}

pub(crate) fn summary(context: &mut ShellContext, _args: &[&str]) -> Result<(), CommandError> {
    let symbol = &context.config.currency_symbol;
    let summary = context.store.summary();
    output::section("Summary");
    output::line(format!(
        "📈 Income:   {}",
        format_amount(symbol, summary.total_income)
    ));
    output::line(format!(
        "📉 Expenses: {}",
        format_amount(symbol, summary.total_expense)
    ));
    let balance = format!("💳 Balance:  {}", format_amount(symbol, summary.balance));
    match summary.status() {
        BalanceStatus::Positive => output::success(balance),
        BalanceStatus::Negative => output::warning(balance),
    }
    Ok(())
}

pub(crate) fn categories(_context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    for kind in kinds_filter(args)? {
        output::section(format!("{kind} categories"));
        for category in kind.categories() {
            let marker = if *category == kind.default_category() {
                " (default)"
            } else {
                ""
            };
            output::line(format!("{}{marker}", category_option(*category)));
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("Date `{raw}` must use YYYY-MM-DD"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::CliMode;
    use crate::config::Config;
    use crate::core::{FixedClock, LedgerStore};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn context() -> ShellContext {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        let store = LedgerStore::with_clock(Box::new(MemoryStore::new()), Box::new(clock));
        ShellContext::with_store(CliMode::Script, store, Config::default())
    }

    #[test]
    fn add_uses_default_category_and_today() {
        let mut ctx = context();
        add(&mut ctx, &["income", "Paycheck", "1000"]).unwrap();
        let record = &ctx.store().income()[0];
        assert_eq!(record.category.as_str(), "salary");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn add_with_explicit_category_and_date() {
        let mut ctx = context();
        add(
            &mut ctx,
            &["expense", "Movie", "12.5", "entertainment", "2023-12-31"],
        )
        .unwrap();
        let record = &ctx.store().expenses()[0];
        assert_eq!(record.category.as_str(), "entertainment");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn add_reports_bad_arguments() {
        let mut ctx = context();
        assert!(matches!(
            add(&mut ctx, &["expense", "Coffee"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(add(&mut ctx, &["expense", "Coffee", "four"]).is_err());
        assert!(add(&mut ctx, &["expense", "Coffee", "4", "food", "01/01/2024"]).is_err());
        assert!(ctx.store().expenses().is_empty());
    }

    #[test]
    fn rejected_add_is_not_a_command_error() {
        let mut ctx = context();
        add(&mut ctx, &["expense", "Bad", "-5", "food"]).unwrap();
        assert!(ctx.store().expenses().is_empty());
    }

    #[test]
    fn delete_accepts_hash_prefixed_ids() {
        let mut ctx = context();
        add(&mut ctx, &["expense", "Coffee", "4.50"]).unwrap();
        let id = ctx.store().expenses()[0].id;
        let prefixed = format!("#{id}");
        delete(&mut ctx, &["expense", prefixed.as_str()]).unwrap();
        assert!(ctx.store().expenses().is_empty());
        let plain = id.to_string();
        delete(&mut ctx, &["expense", plain.as_str()]).unwrap();
    }
}
