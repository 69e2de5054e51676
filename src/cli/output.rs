use std::io::{self, Write};

use colored::Colorize;

use crate::core::services::{HighlightEntry, MonthlyBreakdown};
use crate::core::DashboardSnapshot;
use crate::domain::{Category, Displayable, TransactionType};

/// Text sink for shell output; colour is applied only when enabled.
pub struct Output<W: Write> {
    writer: W,
    use_color: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, use_color: bool) -> Self {
        Self { writer, use_color }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.writer, "{}", text.as_ref())
    }

    pub fn section(&mut self, title: &str) -> io::Result<()> {
        let header = format!("=== {} ===", title.trim());
        if self.use_color {
            writeln!(self.writer, "{}", header.bold())
        } else {
            writeln!(self.writer, "{header}")
        }
    }

    pub fn info(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        self.labelled("INFO", message.as_ref(), false)
    }

    pub fn warning(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        self.labelled("WARNING", message.as_ref(), true)
    }

    pub fn error(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        self.labelled("ERROR", message.as_ref(), true)
    }

    fn labelled(&mut self, label: &str, message: &str, alert: bool) -> io::Result<()> {
        let text = format!("{label}: {message}");
        if self.use_color && alert {
            writeln!(self.writer, "{}", text.yellow())
        } else {
            writeln!(self.writer, "{text}")
        }
    }

    pub fn dashboard(&mut self, snapshot: &DashboardSnapshot) -> io::Result<()> {
        self.section("Dashboard")?;
        let cards = &snapshot.highlights;
        self.highlight("Income", &cards.entries)?;
        self.highlight("Expenses", &cards.expensives)?;
        self.highlight("Total", &cards.total)?;
        for skipped in &snapshot.skipped {
            self.warning(format!("skipped {skipped}"))?;
        }
        Ok(())
    }

    fn highlight(&mut self, title: &str, entry: &HighlightEntry) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:<9} {:>14}  {}",
            title, entry.formatted_amount, entry.description
        )
    }

    pub fn transactions(&mut self, snapshot: &DashboardSnapshot) -> io::Result<()> {
        self.section("Transactions")?;
        if snapshot.transactions.is_empty() {
            return self.line("No transactions yet.");
        }
        for txn in &snapshot.transactions {
            let sign = match txn.kind {
                TransactionType::Positive => "+",
                TransactionType::Negative => "-",
            };
            let category = Category::from_key(&txn.category)
                .map(|category| category.display_name().to_string())
                .unwrap_or_else(|| txn.category.clone());
            let amount = format!("{sign} {}", txn.amount);
            let amount = match (self.use_color, txn.kind) {
                (true, TransactionType::Positive) => amount.green().to_string(),
                (true, TransactionType::Negative) => amount.red().to_string(),
                (false, _) => amount,
            };
            writeln!(
                self.writer,
                "{}  {:<20} {:>16}  {}",
                txn.date, txn.name, amount, category
            )?;
        }
        Ok(())
    }

    pub fn breakdown(&mut self, breakdown: &MonthlyBreakdown) -> io::Result<()> {
        self.section(&format!("Expenses by category: {}", breakdown.label))?;
        if breakdown.is_empty() {
            return self.line(format!("No expenses in {}.", breakdown.label));
        }
        for summary in &breakdown.categories {
            let swatch = if self.use_color {
                let (r, g, b) = summary.category.rgb();
                "■".truecolor(r, g, b).to_string()
            } else {
                "■".to_string()
            };
            writeln!(
                self.writer,
                "{swatch} {:<12} {:>14} {:>5}",
                summary.name, summary.formatted_total, summary.formatted_percent
            )?;
        }
        writeln!(self.writer, "Total {}", breakdown.formatted_total)
    }

    pub fn categories(&mut self) -> io::Result<()> {
        self.section("Categories")?;
        for category in Category::catalog() {
            writeln!(
                self.writer,
                "{:<24} {}",
                category.display_label(),
                category.color()
            )?;
        }
        Ok(())
    }
}
