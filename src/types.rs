use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One line item as it appears in the RO export. Every column is read as
/// optional text and cleaned by the loader.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "RO_ID")]
    pub ro_id: Option<String>,
    #[serde(rename = "Dealer_Name")]
    pub dealer_name: Option<String>,
    #[serde(rename = "Service_Group")]
    pub service_group: Option<String>,
    #[serde(rename = "Service_Type")]
    pub service_type: Option<String>,
    #[serde(rename = "Service_Advisor_Details")]
    pub service_advisor: Option<String>,
    #[serde(rename = "Payment_Method")]
    pub payment_method: Option<String>,
    #[serde(rename = "RO_Open_Date")]
    pub ro_open_date: Option<String>,
    #[serde(rename = "RO_Closed_Date")]
    pub ro_closed_date: Option<String>,
    #[serde(rename = "Labor_Sale")]
    pub labor_sale: Option<String>,
    #[serde(rename = "Labor_Cost")]
    pub labor_cost: Option<String>,
    #[serde(rename = "Labor_Discount")]
    pub labor_discount: Option<String>,
    #[serde(rename = "Labor_Hours")]
    pub labor_hours: Option<String>,
    #[serde(rename = "Parts_Sale")]
    pub parts_sale: Option<String>,
    #[serde(rename = "Parts_Cost")]
    pub parts_cost: Option<String>,
    #[serde(rename = "Parts_Discount")]
    pub parts_discount: Option<String>,
    #[serde(rename = "Misc_Sale")]
    pub misc_sale: Option<String>,
    #[serde(rename = "Misc_Cost")]
    pub misc_cost: Option<String>,
    #[serde(rename = "Misc_Discount")]
    pub misc_discount: Option<String>,
    #[serde(rename = "Sublet_Sale")]
    pub sublet_sale: Option<String>,
    #[serde(rename = "Sublet_Cost")]
    pub sublet_cost: Option<String>,
    #[serde(rename = "Sublet_Discount")]
    pub sublet_discount: Option<String>,
}

/// Sale, cost and discount for one revenue category. `None` means the cell
/// was empty in the export.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryAmounts {
    pub sale: Option<f64>,
    pub cost: Option<f64>,
    pub discount: Option<f64>,
}

/// A cleaned repair-order line item.
#[derive(Debug, Clone, Default)]
pub struct LineItem {
    pub ro_id: String,
    pub dealer_name: String,
    pub service_group: String,
    pub service_type: String,
    pub service_advisor: String,
    pub payment_method: String,
    pub ro_open_date: NaiveDate,
    /// `None` while the RO is still open.
    pub ro_closed_date: Option<NaiveDate>,
    pub labor: CategoryAmounts,
    pub labor_hours: Option<f64>,
    pub parts: CategoryAmounts,
    pub misc: CategoryAmounts,
    pub sublet: CategoryAmounts,
}

impl LineItem {
    pub fn is_closed(&self) -> bool {
        self.ro_closed_date.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkingDayRow {
    #[serde(rename = "Day", default)]
    pub day: Option<String>,
    #[serde(rename = "Contribution")]
    pub contribution: Option<String>,
}

/// Hierarchy level that produced a summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupLevel {
    Dealer,
    ServiceGroup,
    ServiceType,
    Advisor,
    PaymentMethod,
    RepairOrder,
}

impl GroupLevel {
    /// Field of a line item that partitions records at this level.
    pub fn key<'a>(&self, item: &'a LineItem) -> &'a str {
        match self {
            GroupLevel::Dealer => &item.dealer_name,
            GroupLevel::ServiceGroup => &item.service_group,
            GroupLevel::ServiceType => &item.service_type,
            GroupLevel::Advisor => &item.service_advisor,
            GroupLevel::PaymentMethod => &item.payment_method,
            GroupLevel::RepairOrder => &item.ro_id,
        }
    }
}

/// Aggregate for one grouping key. Ratio-style metrics are `None` when the
/// ratio has no meaningful value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummaryRow {
    pub drill: String,
    pub level: GroupLevel,
    pub depth: usize,
    pub ro_count: usize,
    pub open_ros: usize,

    pub labor_sale: f64,
    pub labor_cost: f64,
    pub labor_discount: f64,
    pub labor_hours: f64,
    pub parts_sale: f64,
    pub parts_cost: f64,
    pub parts_discount: f64,
    pub misc_sale: f64,
    pub misc_cost: f64,
    pub misc_discount: f64,
    pub sublet_sale: f64,
    pub sublet_cost: f64,
    pub sublet_discount: f64,

    pub no_work_days: f64,
    pub total_sale: f64,
    pub total_cost: f64,
    pub total_discount: f64,

    pub total_gross: f64,
    pub labor_gross: f64,
    pub parts_gross: f64,
    pub misc_gross: f64,
    pub sublet_gross: f64,
    pub labor_gross_pct: Option<f64>,
    pub parts_gross_pct: Option<f64>,
    pub parts_to_labor_pct: Option<f64>,
    pub elr: Option<f64>,
    pub ro_per_day: Option<f64>,
    pub days_per_ro: Option<f64>,
    pub gross_per_ro: Option<f64>,
    pub hours_per_ro: Option<f64>,
}

/// Summary rows in emission order (pre-order, summary before children).
pub type ReportTable = Vec<GroupSummaryRow>;

/// A report row projected onto the canonical output columns, already
/// decorated for display.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ReportLine {
    #[serde(rename = "Drill")]
    #[tabled(rename = "Drill")]
    pub drill: String,
    #[serde(rename = "Closed ROs")]
    #[tabled(rename = "Closed ROs")]
    pub ro_count: String,
    #[serde(rename = "RO/Day")]
    #[tabled(rename = "RO/Day")]
    pub ro_per_day: String,
    #[serde(rename = "Day/RO")]
    #[tabled(rename = "Day/RO")]
    pub days_per_ro: String,
    #[serde(rename = "Total Sale")]
    #[tabled(rename = "Total Sale")]
    pub total_sale: String,
    #[serde(rename = "Total Gross")]
    #[tabled(rename = "Total Gross")]
    pub total_gross: String,
    #[serde(rename = "Gross/RO")]
    #[tabled(rename = "Gross/RO")]
    pub gross_per_ro: String,
    #[serde(rename = "Labor Hours")]
    #[tabled(rename = "Labor Hours")]
    pub labor_hours: String,
    #[serde(rename = "Hours/RO")]
    #[tabled(rename = "Hours/RO")]
    pub hours_per_ro: String,
    #[serde(rename = "ELR")]
    #[tabled(rename = "ELR")]
    pub elr: String,
    #[serde(rename = "Labor Sale")]
    #[tabled(rename = "Labor Sale")]
    pub labor_sale: String,
    #[serde(rename = "Labor Gross")]
    #[tabled(rename = "Labor Gross")]
    pub labor_gross: String,
    #[serde(rename = "Parts Sale")]
    #[tabled(rename = "Parts Sale")]
    pub parts_sale: String,
    #[serde(rename = "Parts Gross")]
    #[tabled(rename = "Parts Gross")]
    pub parts_gross: String,
    #[serde(rename = "Misc Sale")]
    #[tabled(rename = "Misc Sale")]
    pub misc_sale: String,
    #[serde(rename = "Discounts")]
    #[tabled(rename = "Discounts")]
    pub discounts: String,
    #[serde(rename = "Lbr Gr %")]
    #[tabled(rename = "Lbr Gr %")]
    pub labor_gross_pct: String,
    #[serde(rename = "Pts Gr %")]
    #[tabled(rename = "Pts Gr %")]
    pub parts_gross_pct: String,
    #[serde(rename = "Pt/Lb Sale")]
    #[tabled(rename = "Pt/Lb Sale")]
    pub parts_to_labor_pct: String,
    #[serde(rename = "Open ROs")]
    #[tabled(rename = "Open ROs")]
    pub open_ros: String,
}
