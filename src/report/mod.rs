//! Report rendering over an assembled `AnalysisReport`

use crate::core::{AnalysisReport, RiskLevel, TrendDirection};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_trends(report)?;
        self.write_losses(report)?;
        self.write_risks(report)?;
        self.write_severity(report)?;
        self.write_annual_changes(report)?;
        self.write_summary_stats(report)?;
        self.write_comparison(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Forest Cover Change Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "Period: {}-{} | Regions: {}",
            report.first_year,
            report.last_year,
            report.regions.join(", ")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trends(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Trend Analysis (Mann-Kendall)")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Region | S | Z | p-value | Sen's slope (ha/yr) | Direction | Significant |"
        )?;
        writeln!(
            self.writer,
            "|--------|---|---|---------|---------------------|-----------|-------------|"
        )?;
        for entry in &report.trends {
            let t = &entry.trend;
            writeln!(
                self.writer,
                "| {} | {} | {:.3} | {:.4} | {:+.2} | {} | {} |",
                entry.region,
                t.s_statistic,
                t.z_statistic,
                t.p_value,
                t.sens_slope,
                t.direction,
                if t.is_significant { "yes" } else { "no" }
            )?;
        }
        writeln!(self.writer)?;
        if approximate_pvalues(report) {
            writeln!(
                self.writer,
                "_p-values use the coarse fallback approximation (exact statistics disabled)._"
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_losses(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Loss Attribution")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Region | Fire (ha) | Logging (ha) | Mining (ha) | Gain (ha) | Total Loss (ha) | Net Change (ha) | Fire % | Logging % | Mining % |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----------|--------------|-------------|-----------|-----------------|-----------------|--------|-----------|----------|"
        )?;
        for entry in &report.losses {
            let s = &entry.summary;
            writeln!(
                self.writer,
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:+.2} | {:.1} | {:.1} | {:.1} |",
                entry.region,
                s.fire_total,
                s.logging_total,
                s.mining_total,
                s.gain_total,
                s.total_loss,
                s.net_change,
                s.fire_share_pct,
                s.logging_share_pct,
                s.mining_share_pct
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_risks(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risk Assessment")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Region | Score | Level | Index Factor | Loss Factor | Mining Factor |"
        )?;
        writeln!(
            self.writer,
            "|--------|-------|-------|--------------|-------------|---------------|"
        )?;
        for entry in &report.risks {
            let a = &entry.assessment;
            writeln!(
                self.writer,
                "| {} | {:.3} | {} | {:.4} | {:.4} | {:.4} |",
                entry.region,
                a.risk_score,
                a.risk_level,
                a.index_factor,
                a.loss_factor,
                a.mining_factor
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_severity(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Burn Severity (delta-NBR)")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Region | Year | NBR Before | NBR After | Delta | Severity |"
        )?;
        writeln!(
            self.writer,
            "|--------|------|------------|-----------|-------|----------|"
        )?;
        for row in &report.nbr_rows {
            writeln!(
                self.writer,
                "| {} | {} | {:.3} | {:.3} | {:.3} | {} |",
                row.region,
                row.year,
                row.index_before,
                row.index_after,
                row.index_delta,
                row.severity_class
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_annual_changes(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Annual Change (all regions)")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Year | Total Area (ha) | Fire (ha) | Logging (ha) | Mining (ha) | Gain (ha) | Net (ha) |"
        )?;
        writeln!(
            self.writer,
            "|------|-----------------|-----------|--------------|-------------|-----------|----------|"
        )?;
        for row in &report.annual_changes {
            writeln!(
                self.writer,
                "| {} | {:.0} | {:.0} | {:.0} | {:.0} | {:.0} | {:+.0} |",
                row.year,
                row.total_area,
                row.fire_loss,
                row.logging_loss,
                row.mining_loss,
                row.natural_gain,
                row.net_change
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_stats(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Area Statistics")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Region | Mean (ha) | Std (ha) | Min (ha) | Max (ha) | Total Loss (ha) | Mean Annual Loss (ha) | Change % |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----------|----------|----------|----------|-----------------|-----------------------|----------|"
        )?;
        for stats in &report.summary_stats {
            writeln!(
                self.writer,
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:+.2} |",
                stats.region,
                stats.mean_area,
                stats.std_area,
                stats.min_area,
                stats.max_area,
                stats.total_loss,
                stats.mean_annual_loss,
                stats.change_pct
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_comparison(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let c = &report.comparison;
        writeln!(self.writer, "## Regional Comparison")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Highest total loss: **{}**", c.max_loss_region)?;
        writeln!(self.writer, "- Lowest total loss: **{}**", c.min_loss_region)?;
        writeln!(self.writer, "- Highest risk: **{}**", c.max_risk_region)?;
        writeln!(
            self.writer,
            "- Region-summed loss: {:.2} ha",
            c.total_regional_loss
        )?;
        writeln!(self.writer, "- Mean delta-NBR: {:.4}", c.mean_delta_nbr)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "### Risk Ranking")?;
        writeln!(self.writer)?;
        for (position, ranked) in c.ranking.iter().enumerate() {
            writeln!(
                self.writer,
                "{}. {} - {:.3} ({})",
                position + 1,
                ranked.region,
                ranked.risk_score,
                ranked.risk_level
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header(report);
        print_trends(report);
        print_losses(report);
        print_risks(report);
        print_severity(report);
        print_annual_changes(report);
        print_summary_stats(report);
        print_comparison(report);
        Ok(())
    }
}

fn print_header(report: &AnalysisReport) {
    println!("{}", "Forest Cover Change Report".bold().green());
    println!("{}", "==========================".green());
    println!(
        "Period: {}-{} | Regions: {}",
        report.first_year,
        report.last_year,
        report.regions.join(", ")
    );
    println!();
}

fn print_trends(report: &AnalysisReport) {
    print_trend_table(&report.trends);
    println!();
}

/// Render the per-region trend table to stdout; shared by the full report
/// and the standalone trend command.
pub fn print_trend_table(trends: &[crate::core::RegionTrend]) {
    println!("{} Trend Analysis (Mann-Kendall)", "📈".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Region",
            "S",
            "Z",
            "p-value",
            "Slope (ha/yr)",
            "Direction",
            "Significant",
        ]);
    for entry in trends {
        let t = &entry.trend;
        table.add_row(vec![
            Cell::new(&entry.region),
            Cell::new(t.s_statistic),
            Cell::new(format!("{:.3}", t.z_statistic)),
            Cell::new(format!("{:.4}", t.p_value)),
            Cell::new(format!("{:+.2}", t.sens_slope)),
            direction_cell(t.direction),
            Cell::new(if t.is_significant { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");
    if trends
        .iter()
        .any(|entry| entry.trend.p_value_method.is_approximate())
    {
        println!(
            "{}",
            "note: p-values use the coarse fallback approximation".yellow()
        );
    }
}

fn print_losses(report: &AnalysisReport) {
    println!("{} Loss Attribution", "🔥".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Region",
            "Fire (ha)",
            "Logging (ha)",
            "Mining (ha)",
            "Gain (ha)",
            "Total Loss (ha)",
            "Net (ha)",
            "Fire %",
            "Logging %",
            "Mining %",
        ]);
    for entry in &report.losses {
        let s = &entry.summary;
        table.add_row(vec![
            Cell::new(&entry.region),
            Cell::new(format!("{:.2}", s.fire_total)),
            Cell::new(format!("{:.2}", s.logging_total)),
            Cell::new(format!("{:.2}", s.mining_total)),
            Cell::new(format!("{:.2}", s.gain_total)),
            Cell::new(format!("{:.2}", s.total_loss)),
            Cell::new(format!("{:+.2}", s.net_change)),
            Cell::new(format!("{:.1}", s.fire_share_pct)),
            Cell::new(format!("{:.1}", s.logging_share_pct)),
            Cell::new(format!("{:.1}", s.mining_share_pct)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_risks(report: &AnalysisReport) {
    println!("{} Risk Assessment", "⚠️".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Region",
            "Score",
            "Level",
            "Index Factor",
            "Loss Factor",
            "Mining Factor",
        ]);
    for entry in &report.risks {
        let a = &entry.assessment;
        table.add_row(vec![
            Cell::new(&entry.region),
            Cell::new(format!("{:.3}", a.risk_score)),
            risk_cell(a.risk_level),
            Cell::new(format!("{:.4}", a.index_factor)),
            Cell::new(format!("{:.4}", a.loss_factor)),
            Cell::new(format!("{:.4}", a.mining_factor)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_severity(report: &AnalysisReport) {
    println!("{} Burn Severity (delta-NBR)", "🔥".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Region",
            "Year",
            "NBR Before",
            "NBR After",
            "Delta",
            "Severity",
        ]);
    for row in &report.nbr_rows {
        table.add_row(vec![
            Cell::new(&row.region),
            Cell::new(row.year),
            Cell::new(format!("{:.3}", row.index_before)),
            Cell::new(format!("{:.3}", row.index_after)),
            Cell::new(format!("{:.3}", row.index_delta)),
            Cell::new(row.severity_class.to_string()),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_annual_changes(report: &AnalysisReport) {
    println!("{} Annual Change", "📅".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Year",
            "Total Area (ha)",
            "Fire (ha)",
            "Logging (ha)",
            "Mining (ha)",
            "Gain (ha)",
            "Net (ha)",
        ]);
    for row in &report.annual_changes {
        table.add_row(vec![
            Cell::new(row.year),
            Cell::new(format!("{:.0}", row.total_area)),
            Cell::new(format!("{:.0}", row.fire_loss)),
            Cell::new(format!("{:.0}", row.logging_loss)),
            Cell::new(format!("{:.0}", row.mining_loss)),
            Cell::new(format!("{:.0}", row.natural_gain)),
            Cell::new(format!("{:+.0}", row.net_change)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_summary_stats(report: &AnalysisReport) {
    println!("{} Area Statistics", "📊".bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Region",
            "Mean (ha)",
            "Std (ha)",
            "Min (ha)",
            "Max (ha)",
            "Total Loss (ha)",
            "Change %",
        ]);
    for stats in &report.summary_stats {
        table.add_row(vec![
            Cell::new(&stats.region),
            Cell::new(format!("{:.2}", stats.mean_area)),
            Cell::new(format!("{:.2}", stats.std_area)),
            Cell::new(format!("{:.2}", stats.min_area)),
            Cell::new(format!("{:.2}", stats.max_area)),
            Cell::new(format!("{:.2}", stats.total_loss)),
            Cell::new(format!("{:+.2}", stats.change_pct)),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_comparison(report: &AnalysisReport) {
    let c = &report.comparison;
    println!("{} Regional Comparison", "🌲".bold());
    println!("  Highest total loss: {}", c.max_loss_region.bold().red());
    println!("  Lowest total loss:  {}", c.min_loss_region.bold().green());
    println!("  Highest risk:       {}", c.max_risk_region.bold().red());
    println!("  Region-summed loss: {:.2} ha", c.total_regional_loss);
    println!("  Mean delta-NBR:     {:.4}", c.mean_delta_nbr);
    println!();
    println!("  Risk ranking:");
    for (position, ranked) in c.ranking.iter().enumerate() {
        println!(
            "    {}. {} - {:.3} ({})",
            position + 1,
            ranked.region,
            ranked.risk_score,
            colored_level(ranked.risk_level)
        );
    }

    let high_count = report
        .risks
        .iter()
        .filter(|r| r.assessment.risk_level == RiskLevel::High)
        .count();
    if high_count > 0 {
        println!();
        println!(
            "{}",
            format!("⚠️  {high_count} region(s) at HIGH risk").bold().red()
        );
    }
}

fn approximate_pvalues(report: &AnalysisReport) -> bool {
    report
        .trends
        .iter()
        .any(|entry| entry.trend.p_value_method.is_approximate())
}

fn direction_cell(direction: TrendDirection) -> Cell {
    match direction {
        TrendDirection::Increasing => Cell::new("increasing").fg(Color::Green),
        TrendDirection::Decreasing => Cell::new("decreasing").fg(Color::Red),
        TrendDirection::None => Cell::new("none"),
    }
}

fn risk_cell(level: RiskLevel) -> Cell {
    match level {
        RiskLevel::High => Cell::new("HIGH").fg(Color::Red),
        RiskLevel::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        RiskLevel::Low => Cell::new("LOW").fg(Color::Green),
    }
}

fn colored_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::High => "HIGH".red(),
        RiskLevel::Medium => "MEDIUM".yellow(),
        RiskLevel::Low => "LOW".green(),
    }
}
