//! DTOs de informes
//!
//! Estructuras planas, sin referencias a la base de datos, que el motor de
//! informes devuelve y la API serializa tal cual (camelCase).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DriverStatus, InvoiceStatus, TripStatus, TruckStatus};

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub summary: DashboardSummaryDto,
    pub revenue: DashboardRevenueDto,
    pub trips: DashboardTripDto,
    pub debt: DashboardDebtDto,
    pub recent_trips: Vec<DashboardRecentTripDto>,
    pub top_customers: Vec<DashboardTopCustomerDto>,
    pub truck_status: Vec<DashboardTruckStatusDto>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub total_customers: usize,
    pub total_trucks: usize,
    pub total_drivers: usize,
    pub active_trips: usize,
    pub pending_invoices: usize,
    pub total_outstanding_debt: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRevenueDto {
    pub today_revenue: Decimal,
    pub this_week_revenue: Decimal,
    pub this_month_revenue: Decimal,
    pub this_year_revenue: Decimal,
    pub last_month_revenue: Decimal,
    pub revenue_growth: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTripDto {
    pub today_trips: usize,
    pub this_week_trips: usize,
    pub this_month_trips: usize,
    pub completed_trips: usize,
    pub in_progress_trips: usize,
    pub scheduled_trips: usize,
    pub average_distance: Decimal,
    pub total_distance: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDebtDto {
    pub total_debt: Decimal,
    pub overdue_debt: Decimal,
    pub overdue_invoices: usize,
    pub pending_invoices: usize,
    pub paid_invoices: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRecentTripDto {
    pub id: Uuid,
    pub trip_number: String,
    pub customer_name: String,
    pub origin: String,
    pub destination: String,
    pub status: TripStatus,
    pub scheduled_date: DateTime<Utc>,
    pub distance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTopCustomerDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_revenue: Decimal,
    pub trip_count: usize,
    pub remaining_debt: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTruckStatusDto {
    pub status: TruckStatus,
    pub count: usize,
    pub maintenance_due: usize,
}

// ---------------------------------------------------------------------------
// Revenue / debt / trip status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReportDto {
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    pub total_revenue: Decimal,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    pub total_trips: usize,
    pub completed_trips: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtReportDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_debt: Decimal,
    pub total_paid: Decimal,
    pub remaining_debt: Decimal,
    pub invoice_count: usize,
    pub oldest_invoice_date: Option<DateTime<Utc>>,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStatusReportDto {
    pub status: TripStatus,
    pub count: usize,
    pub total_distance: Decimal,
}

// ---------------------------------------------------------------------------
// Revenue detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDetailReportDto {
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    pub summary: RevenueSummaryDto,
    pub revenue_by_period: Vec<RevenueByPeriodDto>,
    pub revenue_by_customer: Vec<RevenueByCustomerDto>,
    pub revenue_by_trip: Vec<RevenueByTripDto>,
    pub trend: RevenueTrendDto,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummaryDto {
    pub total_revenue: Decimal,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    pub average_invoice_amount: Decimal,
    pub total_invoices: usize,
    pub paid_invoices: usize,
    pub pending_invoices: usize,
    pub overdue_invoices: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByPeriodDto {
    pub period: String,
    pub period_date: DateTime<Utc>,
    pub revenue: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub invoice_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByCustomerDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_revenue: Decimal,
    pub total_paid: Decimal,
    pub remaining_debt: Decimal,
    pub invoice_count: usize,
    pub trip_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByTripDto {
    pub trip_id: Uuid,
    pub trip_number: String,
    pub customer_name: String,
    pub revenue: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub issue_date: DateTime<Utc>,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTrendDto {
    pub current_period_revenue: Decimal,
    pub previous_period_revenue: Decimal,
    pub growth_rate: Decimal,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

// ---------------------------------------------------------------------------
// Trip detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetailReportDto {
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
    pub summary: TripSummaryDto,
    pub trips_by_status: Vec<TripByStatusDto>,
    pub trips_by_period: Vec<TripByPeriodDto>,
    pub trips_by_truck: Vec<TripByTruckDto>,
    pub trips_by_driver: Vec<TripByDriverDto>,
    pub trips_by_customer: Vec<TripByCustomerDto>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummaryDto {
    pub total_trips: usize,
    pub completed_trips: usize,
    pub in_progress_trips: usize,
    pub scheduled_trips: usize,
    pub cancelled_trips: usize,
    pub total_distance: Decimal,
    pub average_distance: Decimal,
    pub total_fuel_cost: Decimal,
    pub average_fuel_cost: Decimal,
    pub total_other_costs: Decimal,
    pub total_revenue: Decimal,
    pub average_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripByStatusDto {
    pub status: TripStatus,
    pub count: usize,
    pub total_distance: Decimal,
    pub average_distance: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripByPeriodDto {
    pub period: String,
    pub period_date: DateTime<Utc>,
    pub trip_count: usize,
    pub completed_count: usize,
    pub total_distance: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripByTruckDto {
    pub truck_id: Uuid,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub trip_count: usize,
    pub completed_count: usize,
    pub total_distance: Decimal,
    pub total_revenue: Decimal,
    pub utilization_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripByDriverDto {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub trip_count: usize,
    pub completed_count: usize,
    pub total_distance: Decimal,
    pub total_revenue: Decimal,
    pub utilization_rate: Decimal,
    /// Reservado: no hay datos de valoración, siempre `0`
    pub average_rating: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripByCustomerDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub trip_count: usize,
    pub completed_count: usize,
    pub total_distance: Decimal,
    pub total_revenue: Decimal,
    pub average_revenue: Decimal,
}

// ---------------------------------------------------------------------------
// Trucks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckReportDto {
    pub summary: TruckSummaryDto,
    pub truck_utilization: Vec<TruckUtilizationDto>,
    pub maintenance_schedule: Vec<TruckMaintenanceDto>,
    pub performance: Vec<TruckPerformanceDto>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckSummaryDto {
    pub total_trucks: usize,
    pub available_trucks: usize,
    pub in_use_trucks: usize,
    pub maintenance_trucks: usize,
    pub inactive_trucks: usize,
    pub maintenance_due: usize,
    pub maintenance_overdue: usize,
    pub average_utilization: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckUtilizationDto {
    pub truck_id: Uuid,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub status: TruckStatus,
    pub trip_count: usize,
    pub days_in_use: i64,
    pub utilization_rate: Decimal,
    pub total_distance: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckMaintenanceDto {
    pub truck_id: Uuid,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub maintenance_interval_days: Option<i32>,
    pub days_until_maintenance: i64,
    pub is_overdue: bool,
    pub status: TruckStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckPerformanceDto {
    pub truck_id: Uuid,
    pub license_plate: String,
    pub trip_count: usize,
    pub total_distance: Decimal,
    pub total_fuel_cost: Decimal,
    pub average_fuel_cost_per_km: Decimal,
    pub total_revenue: Decimal,
    pub profit_margin: Decimal,
    pub average_trip_distance: Decimal,
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReportDto {
    pub summary: DriverSummaryDto,
    pub driver_performance: Vec<DriverPerformanceDto>,
    pub driver_trips: Vec<DriverTripDto>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummaryDto {
    pub total_drivers: usize,
    pub available_drivers: usize,
    pub on_trip_drivers: usize,
    pub off_duty_drivers: usize,
    pub inactive_drivers: usize,
    pub license_expiring_soon: usize,
    pub license_expired: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPerformanceDto {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub license_number: String,
    pub status: DriverStatus,
    pub total_trips: usize,
    pub completed_trips: usize,
    pub in_progress_trips: usize,
    pub completion_rate: Decimal,
    pub total_distance: Decimal,
    pub average_distance: Decimal,
    pub total_revenue: Decimal,
    pub license_expiry_date: DateTime<Utc>,
    pub days_until_license_expiry: i64,
    pub is_license_expiring_soon: bool,
    pub is_license_expired: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverTripDto {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub trip_id: Uuid,
    pub trip_number: String,
    pub customer_name: String,
    pub origin: String,
    pub destination: String,
    pub status: TripStatus,
    pub scheduled_date: DateTime<Utc>,
    pub actual_start_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
    pub distance: Decimal,
    pub revenue: Decimal,
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReportDto {
    pub summary: CustomerSummaryDto,
    pub customer_details: Vec<CustomerDetailDto>,
    pub customer_revenue: Vec<CustomerRevenueDto>,
    pub customer_debt: Vec<CustomerDebtDto>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummaryDto {
    pub total_customers: usize,
    pub active_customers: usize,
    pub inactive_customers: usize,
    pub total_revenue: Decimal,
    pub total_debt: Decimal,
    pub average_revenue_per_customer: Decimal,
    pub total_trips: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub trip_count: usize,
    pub invoice_count: usize,
    pub total_revenue: Decimal,
    pub total_paid: Decimal,
    pub remaining_debt: Decimal,
    pub last_trip_date: Option<DateTime<Utc>>,
    pub last_invoice_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRevenueDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub period: String,
    pub period_date: DateTime<Utc>,
    pub revenue: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub trip_count: usize,
    pub invoice_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDebtDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_debt: Decimal,
    pub overdue_debt: Decimal,
    pub total_invoices: usize,
    pub overdue_invoices: usize,
    pub pending_invoices: usize,
    pub oldest_invoice_date: Option<DateTime<Utc>>,
    pub days_overdue: i64,
}
