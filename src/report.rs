use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::error;

use std::{
    io::{self, Write},
    str::FromStr,
};

use crate::{
    error::{Result, SalesError},
    summary::SalesSummary,
};

/// Line printed by both formats when the summary has no data.
const NO_DATA: &str = "Nenhum dado de vendas disponível.";

/// Output format for a sales report.
///
/// # Examples
///
/// Anything other than `text` or `json` is rejected:
///
/// ```
/// use std::str::FromStr;
/// use vendas::ReportFormat;
///
/// assert_eq!(ReportFormat::from_str("json").unwrap(), ReportFormat::Json);
/// assert!(ReportFormat::from_str("xml").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SalesError::InvalidFormat {
                given: other.to_string(),
            }),
        }
    }
}

/// Capability interface for renderers that present a [`SalesSummary`].
pub trait Renderer {
    /// Hands the renderer the summary to present.
    fn set_summary(&mut self, summary: SalesSummary);

    /// Selects the output format.
    fn set_format(&mut self, format: ReportFormat);

    /// Renders the summary to standard output.
    ///
    /// Returns the rendered summary unchanged so callers can keep using it
    /// without aggregating again. Rendering faults are logged and swallowed,
    /// never propagated.
    fn render(&mut self) -> Option<&SalesSummary>;
}

/// Renders a [`SalesSummary`] as a fixed text layout or as a JSON document.
///
/// To render to standard output, use [`Renderer::render`]. To render to an
/// arbitrary writer, use [`SalesReport::write_to`].
#[derive(Debug, Default)]
pub struct SalesReport {
    summary: Option<SalesSummary>,
    format: ReportFormat,
}

impl SalesReport {
    pub fn new(summary: SalesSummary, format: ReportFormat) -> Self {
        Self {
            summary: Some(summary),
            format,
        }
    }

    /// Writes the report to `out` in the selected format.
    ///
    /// Writes nothing if no summary has been set.
    ///
    /// # Errors
    ///
    /// Returns errors from writing to `out` or serializing the summary.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(summary) = &self.summary else {
            return Ok(());
        };
        match self.format {
            ReportFormat::Text => write_text(summary, out),
            ReportFormat::Json => write_json(summary, out),
        }
    }
}

impl Renderer for SalesReport {
    fn set_summary(&mut self, summary: SalesSummary) {
        self.summary = Some(summary);
    }

    fn set_format(&mut self, format: ReportFormat) {
        self.format = format;
    }

    fn render(&mut self) -> Option<&SalesSummary> {
        let stdout = io::stdout();
        if let Err(err) = self.write_to(&mut stdout.lock()) {
            error!("failed to generate report: {err}");
        }
        self.summary.as_ref()
    }
}

fn write_text<W: Write>(summary: &SalesSummary, out: &mut W) -> Result<()> {
    if summary.is_empty() {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }

    let start = summary.filter_dates.start.as_deref().unwrap_or("N/A");
    let end = summary.filter_dates.end.as_deref().unwrap_or("N/A");

    writeln!(out, "{:-<50}", "")?;
    writeln!(out, "           RELATÓRIO DE VENDAS           ")?;
    writeln!(out, "Filtro de Datas: {start} a {end}")?;
    writeln!(out, "{:-<50}", "")?;

    writeln!(out, "\n## Produto Mais Vendido (por Unidades)")?;
    let best = &summary.best_selling_product;
    writeln!(out, "Produto: {} ({} unidades)", best.product, best.quantity)?;
    writeln!(out, "{:-<50}", "")?;

    writeln!(out, "\n## Valor Total de Todas as Vendas")?;
    writeln!(out, "Total Geral: R$ {}", summary.total_global_revenue)?;
    writeln!(out, "{:-<50}", "")?;

    writeln!(out, "\n## Total de Vendas (Receita) por Produto")?;
    for item in &summary.revenue_per_product {
        writeln!(out, "- {:<10}: R$ {}", item.product, item.revenue)?;
    }
    writeln!(out, "{:-<50}", "")?;
    Ok(())
}

fn write_json<W: Write>(summary: &SalesSummary, out: &mut W) -> Result<()> {
    if summary.is_empty() {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, formatter);
    summary.serialize(&mut ser)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::money::Brl;
    use crate::summary::{BestSeller, FilterDates, ProductRevenue};

    use super::*;

    fn sample_summary() -> SalesSummary {
        SalesSummary {
            report_date: "2025-10-04 12:00:00".to_string(),
            filter_dates: FilterDates {
                start: Some("2025-01-01".to_string()),
                end: None,
            },
            total_global_revenue: Brl::from_str("149.8").unwrap(),
            best_selling_product: BestSeller {
                product: "Camiseta".to_string(),
                quantity: 3,
            },
            revenue_per_product: vec![
                ProductRevenue {
                    product: "Camiseta".to_string(),
                    revenue: Brl::from_str("149.8").unwrap(),
                },
                ProductRevenue {
                    product: "Calça".to_string(),
                    revenue: Brl::ZERO,
                },
            ],
        }
    }

    fn empty_summary() -> SalesSummary {
        SalesSummary {
            report_date: "2025-10-04 12:00:00".to_string(),
            filter_dates: FilterDates::default(),
            total_global_revenue: Brl::ZERO,
            best_selling_product: BestSeller::default(),
            revenue_per_product: Vec::new(),
        }
    }

    fn rendered(summary: SalesSummary, format: ReportFormat) -> String {
        let report = SalesReport::new(summary, format);
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_to_fn_renders_the_text_sections() {
        let out = rendered(sample_summary(), ReportFormat::Text);
        assert!(out.contains("RELATÓRIO DE VENDAS"), "{out}");
        assert!(out.contains("Filtro de Datas: 2025-01-01 a N/A"), "{out}");
        assert!(out.contains("Produto: Camiseta (3 unidades)"), "{out}");
        assert!(out.contains("Total Geral: R$ 149.80"), "{out}");
    }

    #[test]
    fn write_to_fn_left_justifies_product_names() {
        let out = rendered(sample_summary(), ReportFormat::Text);
        assert!(out.contains("- Camiseta  : R$ 149.80"), "{out}");
    }

    #[test]
    fn write_to_fn_renders_json_with_full_fidelity() {
        let out = rendered(sample_summary(), ReportFormat::Json);
        assert!(out.contains("\"Calça\""), "non-ASCII was escaped: {out}");
        assert!(
            out.contains("\n    \"report_date\""),
            "not 4-space indented: {out}"
        );

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_global_revenue"], Value::from(149.8));
        assert_eq!(value["best_selling_product"]["product"], "Camiseta");
        assert_eq!(value["best_selling_product"]["quantity"], Value::from(3));
        assert_eq!(value["filter_dates"]["end"], Value::Null);
        assert_eq!(value["revenue_per_product"][0]["product"], "Camiseta");
    }

    #[test]
    fn write_to_fn_prints_the_no_data_line_in_both_formats() {
        for format in [ReportFormat::Text, ReportFormat::Json] {
            let out = rendered(empty_summary(), format);
            assert_eq!(out, "Nenhum dado de vendas disponível.\n");
        }
    }

    #[test]
    fn write_to_fn_writes_nothing_without_a_summary() {
        let report = SalesReport::default();
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn set_format_fn_switches_the_output() {
        let mut report = SalesReport::default();
        report.set_summary(sample_summary());
        report.set_format(ReportFormat::Json);
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert!(out.starts_with(b"{"));
    }

    #[test]
    fn from_str_fn_rejects_unknown_formats() {
        let err = ReportFormat::from_str("yaml").unwrap_err();
        assert!(matches!(err, SalesError::InvalidFormat { ref given } if given == "yaml"));
    }
}
