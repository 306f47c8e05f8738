//! Subcommand handlers.
//!
//! Handlers parse raw arguments into engine types and return serializable
//! reports. All lookup tables are built once from configuration in [`Planner`].

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mandap_core::budget::{
    BudgetCategory, BudgetHealth, BudgetService, BudgetSummary, CategoryUsage, EstimateCoverage,
};
use mandap_core::ceremony::{
    CeremonyCalendar, CeremonyError, CeremonyScheduler, ScheduledCeremony, TimingGroups,
    TraditionCatalog,
};
use mandap_core::pricing::{
    CatalogEstimate, CostRange, LineItemCatalog, PricingContext, PricingService, RateTables,
    VendorTier, VenueClass,
};
use mandap_shared::types::{Currency, Money};
use mandap_shared::{AppConfig, AppError, AppResult};

use crate::cli::{BudgetArgs, ContextArgs, EstimateArgs, ScheduleArgs};

/// Lookup tables and reporting settings resolved from configuration.
#[derive(Debug, Clone)]
pub struct Planner {
    rates: RateTables,
    catalog: LineItemCatalog,
    calendar: CeremonyCalendar,
    traditions: TraditionCatalog,
    currency: Currency,
    default_city: Option<String>,
}

/// Output of `mandap estimate`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EstimateReport {
    /// A single refined range from explicit base bounds.
    Range {
        /// Context the range was computed for.
        context: PricingContext,
        /// Composed multiplier.
        multiplier: Decimal,
        /// Refined range.
        range: CostRange,
        /// Reporting currency.
        currency: Currency,
    },
    /// Catalog line items with totals.
    Catalog {
        /// Context the estimate was computed for.
        context: PricingContext,
        /// Per-item estimate and totals.
        estimate: CatalogEstimate,
        /// Totals in the reporting currency.
        totals: MoneyTotals,
    },
}

/// Estimate totals as money.
#[derive(Debug, Serialize)]
pub struct MoneyTotals {
    /// Sum of item lows.
    pub low: Money,
    /// Sum of item highs.
    pub high: Money,
    /// Midpoint of the totals.
    pub single: Money,
}

/// Output of `mandap schedule`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScheduleReport {
    /// Ceremonies in date order.
    Itinerary {
        /// Anchor date.
        wedding_date: NaiveDate,
        /// Scheduled ceremonies.
        itinerary: Vec<ScheduledCeremony>,
    },
    /// Ceremonies grouped by timing.
    Grouped {
        /// Anchor date.
        wedding_date: NaiveDate,
        /// Timing groups.
        groups: TimingGroups,
    },
}

/// Input file for `mandap budget`.
#[derive(Debug, Deserialize)]
struct BudgetInput {
    total_budget: Decimal,
    #[serde(default)]
    categories: Vec<BudgetCategory>,
    #[serde(default)]
    context: Option<PricingContext>,
}

/// Output of `mandap budget`.
#[derive(Debug, Serialize)]
pub struct BudgetReport {
    /// Totals across categories.
    pub summary: BudgetSummary,
    /// Per-category usage.
    pub categories: Vec<CategoryUsage>,
    /// Budget against the catalog estimate, when a context was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}

/// Budget compared with a catalog estimate.
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    /// Estimate low total.
    pub estimate_low: Decimal,
    /// Estimate high total.
    pub estimate_high: Decimal,
    /// Coverage classification.
    #[serde(flatten)]
    pub coverage: EstimateCoverage,
}

impl Planner {
    /// Builds and validates every table from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a configured table is invalid.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let planner = Self {
            rates: RateTables::from_config(&config.pricing)?,
            catalog: LineItemCatalog::standard(),
            calendar: CeremonyCalendar::from_config(&config.ceremonies)?,
            traditions: TraditionCatalog::from_config(&config.ceremonies)?,
            currency: config.pricing.currency,
            default_city: config.pricing.default_city.clone(),
        };

        info!(
            currency = %planner.currency,
            cities = planner.rates.cities.len(),
            traditions = planner.traditions.slugs().count(),
            "planner tables loaded"
        );

        Ok(planner)
    }

    /// Handles `mandap estimate`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for unknown slugs or malformed amounts and
    /// `AppError::NotFound` for an unknown `--only` category.
    pub fn estimate(&self, args: &EstimateArgs) -> AppResult<EstimateReport> {
        let context = self.context(&args.context)?;

        if let (Some(low), Some(high)) = (&args.base_low, &args.base_high) {
            let base_low = parse_amount("base-low", low)?;
            let base_high = parse_amount("base-high", high)?;
            if base_low > base_high {
                return Err(AppError::Validation(format!(
                    "base-low {base_low} exceeds base-high {base_high}"
                )));
            }

            return Ok(EstimateReport::Range {
                multiplier: PricingService::compose_multiplier(&self.rates, &context),
                range: PricingService::refine(&self.rates, base_low, base_high, &context),
                currency: self.currency,
                context,
            });
        }

        let catalog = if args.only.is_empty() {
            self.catalog.clone()
        } else {
            if let Some(missing) = args.only.iter().find(|c| self.catalog.find(c).is_none()) {
                return Err(AppError::NotFound(format!("catalog category '{missing}'")));
            }
            self.catalog.select(&args.only)
        };

        let estimate = PricingService::estimate_catalog(
            &self.rates,
            catalog.items(),
            context.guest_count,
            &context,
        );
        let totals = MoneyTotals {
            low: Money::new(estimate.total_low, self.currency),
            high: Money::new(estimate.total_high, self.currency),
            single: Money::new(estimate.total_single, self.currency),
        };

        info!(
            items = estimate.items.len(),
            low = %totals.low,
            high = %totals.high,
            "catalog estimated"
        );

        Ok(EstimateReport::Catalog {
            context,
            estimate,
            totals,
        })
    }

    /// Handles `mandap schedule`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed date or empty ceremony id
    /// and `AppError::NotFound` for an unknown tradition.
    pub fn schedule(&self, args: &ScheduleArgs) -> AppResult<ScheduleReport> {
        let wedding_date = parse_date(&args.date)?;
        let scheduler = CeremonyScheduler::new(&self.calendar);

        let ceremonies: &[String] = match &args.tradition {
            Some(slug) => self
                .traditions
                .ceremonies(slug)
                .ok_or_else(|| CeremonyError::UnknownTradition(slug.clone()))?,
            None => {
                if args.ceremony.iter().any(String::is_empty) {
                    return Err(AppError::Validation(
                        "ceremony id must not be empty".to_string(),
                    ));
                }
                &args.ceremony
            }
        };

        if args.grouped {
            Ok(ScheduleReport::Grouped {
                wedding_date,
                groups: scheduler.group_by_timing(wedding_date, ceremonies),
            })
        } else {
            Ok(ScheduleReport::Itinerary {
                wedding_date,
                itinerary: scheduler.itinerary(wedding_date, ceremonies),
            })
        }
    }

    /// Handles `mandap budget`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the input file cannot be read or parsed,
    /// or if `--total` is malformed.
    pub fn budget(&self, args: &BudgetArgs) -> AppResult<BudgetReport> {
        let input = read_budget_input(&args.input)?;
        let total_budget = match &args.total {
            Some(total) => parse_amount("total", total)?,
            None => input.total_budget,
        };

        let summary = BudgetService::aggregate(&input.categories, total_budget);
        let categories = BudgetService::category_breakdown(&input.categories);
        for usage in &categories {
            if let BudgetHealth::OverBudget { overage } = usage.status {
                warn!(
                    category = %usage.id,
                    name = %usage.name,
                    %overage,
                    "category over its allocation"
                );
            }
        }
        let coverage = input.context.map(|context| {
            let estimate = PricingService::estimate_catalog(
                &self.rates,
                self.catalog.items(),
                context.guest_count,
                &context,
            );
            CoverageReport {
                estimate_low: estimate.total_low,
                estimate_high: estimate.total_high,
                coverage: BudgetService::coverage(total_budget, &estimate),
            }
        });

        info!(
            spent = %Money::new(summary.total_spent, self.currency),
            status = summary.status.label(),
            "budget summarized"
        );

        Ok(BudgetReport {
            summary,
            categories,
            coverage,
        })
    }

    fn context(&self, args: &ContextArgs) -> AppResult<PricingContext> {
        let venue = VenueClass::from_str(&args.venue)?;
        let tier = VendorTier::from_str(&args.tier)?;
        let context = PricingContext::new(venue, tier, args.guests);

        Ok(match args.city.as_ref().or(self.default_city.as_ref()) {
            Some(city) => context.with_city(city.as_str()),
            None => context,
        })
    }
}

fn parse_amount(field: &str, value: &str) -> AppResult<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| AppError::Validation(format!("{field}: invalid amount '{value}': {e}")))
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::Validation(format!("invalid date '{value}': {e}")))
}

fn read_budget_input(path: &Path) -> AppResult<BudgetInput> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Validation(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Validation(format!("invalid budget file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use rust_decimal_macros::dec;

    fn planner() -> Planner {
        Planner::from_config(&AppConfig::default()).unwrap()
    }

    fn context_args(venue: &str, tier: &str, guests: u32, city: Option<&str>) -> ContextArgs {
        ContextArgs {
            venue: venue.to_string(),
            tier: tier.to_string(),
            guests,
            city: city.map(str::to_string),
        }
    }

    fn estimate_args(base: Option<(&str, &str)>, only: &[&str]) -> EstimateArgs {
        EstimateArgs {
            context: context_args("community_hall", "standard", 150, None),
            base_low: base.map(|(low, _)| low.to_string()),
            base_high: base.map(|(_, high)| high.to_string()),
            only: only.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_estimate_range() {
        let report = planner()
            .estimate(&estimate_args(Some(("1000", "2000")), &[]))
            .unwrap();

        let EstimateReport::Range {
            multiplier, range, ..
        } = report
        else {
            panic!("expected range");
        };
        assert_eq!(multiplier, dec!(0.686));
        assert_eq!(range.low, dec!(686));
        assert_eq!(range.high, dec!(1372));
    }

    #[test]
    fn test_estimate_rejects_inverted_bounds() {
        let err = planner()
            .estimate(&estimate_args(Some(("2000", "1000")), &[]))
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_estimate_rejects_bad_amount() {
        let err = planner()
            .estimate(&estimate_args(Some(("lots", "2000")), &[]))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_estimate_range_at_decimal_max() {
        let max = Decimal::MAX.to_string();
        let mut args = estimate_args(Some((max.as_str(), max.as_str())), &[]);
        args.context = context_args("hotel_ballroom", "premium", 300, Some("vancouver"));

        let EstimateReport::Range { range, .. } = planner().estimate(&args).unwrap() else {
            panic!("expected range");
        };
        assert_eq!(range.low, Decimal::MAX);
        assert_eq!(range.high, Decimal::MAX);
    }

    #[test]
    fn test_estimate_unknown_venue() {
        let mut args = estimate_args(None, &[]);
        args.context.venue = "castle".to_string();

        let err = planner().estimate(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_estimate_only_selected_categories() {
        let report = planner()
            .estimate(&estimate_args(None, &["dj", "venue"]))
            .unwrap();

        let EstimateReport::Catalog {
            estimate, totals, ..
        } = report
        else {
            panic!("expected catalog");
        };
        assert_eq!(estimate.items.len(), 2);
        assert_eq!(totals.low.amount, estimate.total_low);
        assert_eq!(totals.low.currency, Currency::Cad);
    }

    #[test]
    fn test_estimate_unknown_only_category() {
        let err = planner()
            .estimate(&estimate_args(None, &["fireworks"]))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains("fireworks")));
    }

    #[test]
    fn test_default_city_applies_when_unset() {
        let mut config = AppConfig::default();
        config.pricing.default_city = Some("vancouver".to_string());
        let planner = Planner::from_config(&config).unwrap();

        let context = planner
            .context(&context_args("hotel_ballroom", "premium", 250, None))
            .unwrap();
        assert_eq!(context.city.as_deref(), Some("vancouver"));

        let context = planner
            .context(&context_args("hotel_ballroom", "premium", 250, Some("calgary")))
            .unwrap();
        assert_eq!(context.city.as_deref(), Some("calgary"));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let mut config = AppConfig::default();
        config.pricing.tier_factors.insert("premium".into(), dec!(-1));

        let err = Planner::from_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    fn schedule_args(tradition: Option<&str>, ceremonies: &[&str], grouped: bool) -> ScheduleArgs {
        ScheduleArgs {
            date: "2025-06-20".to_string(),
            tradition: tradition.map(str::to_string),
            ceremony: ceremonies.iter().map(|s| (*s).to_string()).collect(),
            grouped,
        }
    }

    #[test]
    fn test_schedule_ceremonies() {
        let report = planner()
            .schedule(&schedule_args(None, &["walima", "nikah"], false))
            .unwrap();

        let ScheduleReport::Itinerary { itinerary, .. } = report else {
            panic!("expected itinerary");
        };
        assert_eq!(itinerary[0].ceremony_id, "nikah");
        assert_eq!(itinerary[1].date, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap());
    }

    #[test]
    fn test_schedule_tradition_grouped() {
        let report = planner()
            .schedule(&schedule_args(Some("sikh"), &[], true))
            .unwrap();

        let ScheduleReport::Grouped { groups, .. } = report else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 11);
    }

    #[test]
    fn test_schedule_unknown_tradition() {
        let err = planner()
            .schedule(&schedule_args(Some("jedi"), &[], false))
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_schedule_bad_date() {
        let mut args = schedule_args(None, &["nikah"], false);
        args.date = "20/06/2025".to_string();

        assert!(matches!(
            planner().schedule(&args),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_schedule_empty_ceremony_id() {
        assert!(matches!(
            planner().schedule(&schedule_args(None, &[""], false)),
            Err(AppError::Validation(_))
        ));
    }

    fn budget_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const BUDGET_JSON: &str = r#"{
        "total_budget": "1000",
        "categories": [
            {"id": "0190a4c2-7d1e-7000-8000-000000000001", "name": "Catering", "allocated_amount": "500", "spent_amount": "450"},
            {"id": "0190a4c2-7d1e-7000-8000-000000000002", "name": "Decor", "allocated_amount": "300", "spent_amount": "100"}
        ]
    }"#;

    #[test]
    fn test_budget_from_file() {
        let file = budget_file(BUDGET_JSON);
        let args = BudgetArgs {
            input: file.path().to_path_buf(),
            total: None,
        };

        let report = planner().budget(&args).unwrap();
        assert_eq!(report.summary.total_spent, dec!(550));
        assert_eq!(report.summary.usage_percent, dec!(55));
        assert_eq!(report.summary.status, BudgetHealth::Normal);
        assert_eq!(report.categories.len(), 2);
        assert!(report.coverage.is_none());
    }

    #[test]
    fn test_budget_total_override() {
        let file = budget_file(BUDGET_JSON);
        let args = BudgetArgs {
            input: file.path().to_path_buf(),
            total: Some("500".to_string()),
        };

        let report = planner().budget(&args).unwrap();
        assert_eq!(
            report.summary.status,
            BudgetHealth::OverBudget { overage: dec!(50) }
        );
    }

    #[test]
    fn test_budget_with_context_reports_coverage() {
        let file = budget_file(
            r#"{
                "total_budget": "1000",
                "categories": [],
                "context": {"venue_class": "home", "vendor_tier": "budget", "guest_count": 50}
            }"#,
        );
        let args = BudgetArgs {
            input: file.path().to_path_buf(),
            total: None,
        };

        let report = planner().budget(&args).unwrap();
        let coverage = report.coverage.unwrap();
        assert!(matches!(
            coverage.coverage,
            EstimateCoverage::Insufficient { .. }
        ));
        assert!(coverage.estimate_low > dec!(1000));
    }

    #[test]
    fn test_budget_tiny_total_saturates_usage() {
        let file = budget_file(
            r#"{
                "total_budget": "0.000000000000000000001",
                "categories": [
                    {"id": "0190a4c2-7d1e-7000-8000-000000000003", "allocated_amount": "1000", "spent_amount": "1000000000000"}
                ]
            }"#,
        );
        let args = BudgetArgs {
            input: file.path().to_path_buf(),
            total: None,
        };

        let report = planner().budget(&args).unwrap();
        assert_eq!(report.summary.usage_percent, Decimal::MAX);
        assert!(matches!(
            report.summary.status,
            BudgetHealth::OverBudget { .. }
        ));
        assert!(matches!(
            report.categories[0].status,
            BudgetHealth::OverBudget { .. }
        ));
    }

    #[test]
    fn test_budget_missing_file() {
        let args = BudgetArgs {
            input: "does/not/exist.json".into(),
            total: None,
        };
        assert!(matches!(
            planner().budget(&args),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_budget_malformed_json() {
        let file = budget_file("{ not json");
        let args = BudgetArgs {
            input: file.path().to_path_buf(),
            total: None,
        };
        assert!(matches!(
            planner().budget(&args),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_reports_serialize() {
        let report = planner()
            .estimate(&estimate_args(Some(("1000", "2000")), &[]))
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["range"]["low"], "686");
        assert_eq!(json["currency"], "CAD");
    }
}
