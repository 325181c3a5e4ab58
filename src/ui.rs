//! Terminal presentation.
//!
//! Everything here is a pure function of its inputs except [`TerminalSink`],
//! which paints finished frames over the previous one.

use chrono::{DateTime, Local};
use crossterm::style::Stylize;
use crossterm::{QueueableCommand, cursor, terminal};
use std::io::{self, Write};

use crate::config::AppConfig;
use crate::discovery::BroadcasterRecord;
use crate::history::LogLevel;
use crate::monitor::MonitorState;
use crate::tokens;
use crate::utils;

/// (header, width) for each table column.
const COLUMNS: [(&str, usize); 7] = [
    ("Railgun Address", 24),
    ("Token", 24),
    ("Fee", 18),
    ("Expires", 9),
    ("Reliability", 11),
    ("Wallets", 7),
    ("Relay Adapt", 16),
];

const TOKEN_ADDRESS_BUDGET: usize = 15;
const COLUMN_GAP: &str = "  ";

/// Number of characters of the trusted signer key shown in the header.
const SIGNER_PREVIEW: usize = 10;

/// Formats a log-pane line: time of day, severity glyph, message.
pub fn format_log_line(message: &str, level: LogLevel, time: &DateTime<Local>) -> String {
    let prefix = format!("[{}]", utils::time_of_day(time)).dark_grey();
    let glyph = match level {
        LogLevel::Success => "✔".green(),
        LogLevel::Error => "✖".red(),
        LogLevel::Warn => "⚠".yellow(),
        LogLevel::Info => "ℹ".blue(),
    };
    format!("{} {} {}", prefix, glyph, message)
}

/// Label for a token: symbol and shortened address, or just the address.
pub fn token_label(chain_id: u64, token_address: &str) -> String {
    let address = utils::truncate_middle(token_address, TOKEN_ADDRESS_BUDGET);
    match tokens::resolve(chain_id, token_address).symbol {
        Some(symbol) => format!("{} {}", symbol, address),
        None => address,
    }
}

fn pad(cells: &[String]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn table_row(record: &BroadcasterRecord, chain_id: u64) -> Vec<String> {
    let fee = &record.token_fee;
    vec![
        utils::truncate_middle(&record.railgun_address, COLUMNS[0].1),
        token_label(chain_id, &record.token_address),
        utils::format_token_fee(chain_id, &record.token_address, &fee.fee_per_unit_gas),
        utils::format_expiration(fee.expiration),
        utils::format_reliability(fee.reliability),
        fee.available_wallets.to_string(),
        utils::truncate_middle(&fee.relay_adapt, COLUMNS[6].1),
    ]
}

/// Renders the broadcaster table, one row per record.
pub fn render_table(records: &[BroadcasterRecord], chain_id: u64) -> String {
    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    let width: usize =
        COLUMNS.iter().map(|(_, w)| w).sum::<usize>() + COLUMN_GAP.len() * (COLUMNS.len() - 1);

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(pad(&header).cyan().to_string());
    lines.push("─".repeat(width).dark_grey().to_string());

    for record in records {
        let mut cells = table_row(record, chain_id);
        cells[2] = format!("{:<width$}", cells[2], width = COLUMNS[2].1)
            .green()
            .to_string();
        lines.push(pad(&cells));
    }

    lines.join("\n")
}

/// Renders the whole monitor view.
pub fn render_frame(state: &MonitorState, config: &AppConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(
        format!("Railgun Broadcaster Monitor (Chain: {})", config.chain.id)
            .bold()
            .underlined()
            .to_string(),
    );
    lines.push(format!(
        "{} {}  |  {} {}",
        "Status:".bold(),
        state.connection_status,
        "Mesh Peers:".bold(),
        state.mesh_peer_count
    ));

    let signer = match &config.trusted_fee_signer {
        Some(key) => {
            let preview: String = key.chars().take(SIGNER_PREVIEW).collect();
            format!("{preview}...")
        }
        None => "⚠ Disabled (No fee protection)".yellow().bold().to_string(),
    };
    lines.push(format!("{} {}", "Trusted Signer:".bold(), signer));

    let last_scan = match &state.last_scan_time {
        Some(time) => utils::time_of_day(time),
        None => "Pending...".to_string(),
    };
    lines.push(format!("{} {}", "Last Scan:".bold(), last_scan));
    lines.push(String::new());

    lines.push("--- Recent Logs ---".dim().to_string());
    if state.logs.is_empty() {
        lines.push("(No logs yet)".dark_grey().to_string());
    } else {
        lines.extend(state.logs.iter().map(|line| line.text.clone()));
    }
    lines.push(String::new());

    if state.broadcasters.is_empty() {
        lines.push("No broadcasters found yet.".yellow().to_string());
    } else {
        lines.push(format!("Broadcasters: {}", state.broadcasters.len()));
        lines.push(render_table(&state.broadcasters, config.chain.id));
    }

    lines.join("\n")
}

/// Destination for rendered frames.
pub trait FrameSink: Send {
    fn draw(&mut self, frame: &str);
}

/// Draws frames to stdout, replacing the previous frame in place.
#[derive(Default)]
pub struct TerminalSink;

impl TerminalSink {
    fn paint(frame: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .queue(cursor::MoveTo(0, 0))?
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for line in frame.lines() {
            write!(stdout, "{}\r\n", line)?;
        }
        stdout.flush()
    }
}

impl FrameSink for TerminalSink {
    fn draw(&mut self, frame: &str) {
        if let Err(e) = Self::paint(frame) {
            log::debug!("Failed to draw frame: {}", e);
        }
    }
}
