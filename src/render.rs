//! Plain-text rendering of screens for the terminal.

use std::io::Write;

use custody_admin::domain::user::{LedgerEntry, LedgerKind};
use custody_admin::view::{DashboardScreen, Notice, UserDetailScreen, ViewState};

pub fn notice<W: Write>(writer: &mut W, notice: &Notice) -> std::io::Result<()> {
    writeln!(writer, "{}: {}", notice.title, notice.description)
}

pub fn users<W: Write>(writer: &mut W, screen: &DashboardScreen) -> std::io::Result<()> {
    match screen.state() {
        ViewState::Loading => writeln!(writer, "Loading...")?,
        ViewState::Error(e) => writeln!(writer, "Error: {e}")?,
        ViewState::Ready(rows) if rows.is_empty() => writeln!(writer, "No users.")?,
        ViewState::Ready(rows) => {
            writeln!(writer, "Username")?;
            for row in rows {
                writeln!(writer, "{}", row.username)?;
            }
        }
    }

    let mut nav = Vec::new();
    if screen.can_previous() {
        nav.push(format!("--page {}", screen.page() - 1));
    }
    if screen.can_next() {
        nav.push(format!("--page {}", screen.page() + 1));
    }
    write!(writer, "Page {}", screen.page())?;
    if nav.is_empty() {
        writeln!(writer)
    } else {
        writeln!(writer, " ({})", nav.join(", "))
    }
}

pub fn user_detail<W: Write>(writer: &mut W, screen: &UserDetailScreen) -> std::io::Result<()> {
    let detail = match screen.state() {
        ViewState::Loading => return writeln!(writer, "Loading..."),
        ViewState::Error(e) => return writeln!(writer, "Error: {e}"),
        ViewState::Ready(detail) => detail,
    };

    writeln!(writer, "User Details")?;
    writeln!(writer, "  Username:      {}", detail.username)?;
    writeln!(
        writer,
        "  Auto withdraw: {}",
        if detail.auto_withdraw { "on" } else { "off" }
    )?;
    for (key, value) in &detail.extra {
        writeln!(writer, "  {key}: {value}")?;
    }
    match screen.balance() {
        Some(balance) => writeln!(writer, "  Balance:       {balance}")?,
        None => writeln!(writer, "  Balance:       -")?,
    }

    ledger(writer, LedgerKind::Charge, screen.charge_history())?;
    ledger(writer, LedgerKind::Withdraw, screen.withdraw_history())
}

fn ledger<W: Write>(writer: &mut W, kind: LedgerKind, entries: &[LedgerEntry]) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", kind.title())?;
    if entries.is_empty() {
        return writeln!(writer, "  (none)");
    }
    // Date \t From \t To \t Amount
    for entry in entries {
        writeln!(
            writer,
            "  {}\t{}\t{}\t{} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.source,
            entry.destination,
            entry.amount,
            custody_admin::shared::CURRENCY,
        )?;
    }
    Ok(())
}

pub fn status<W: Write>(
    writer: &mut W,
    logged_in: bool,
    api_url: &str,
    session_path: &std::path::Path,
) -> std::io::Result<()> {
    writeln!(writer, "API:     {api_url}")?;
    writeln!(writer, "Session: {}", session_path.display())?;
    writeln!(
        writer,
        "Status:  {}",
        if logged_in { "logged in" } else { "not logged in" }
    )
}
