//! Instantánea en memoria de las entidades de negocio
//!
//! El motor de informes nunca navega relaciones perezosas: recibe las seis
//! colecciones completas y usa índices por identificador construidos aquí.

use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{Customer, Driver, Invoice, Payment, Trip, Truck};

#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub customers: Vec<Customer>,
    pub trucks: Vec<Truck>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    paid_by_invoice: HashMap<Uuid, Decimal>,
    billed_by_trip: HashMap<Uuid, Decimal>,
    customer_names: HashMap<Uuid, String>,
}

impl ReportSnapshot {
    pub fn new(
        customers: Vec<Customer>,
        trucks: Vec<Truck>,
        drivers: Vec<Driver>,
        trips: Vec<Trip>,
        invoices: Vec<Invoice>,
        payments: Vec<Payment>,
    ) -> Self {
        let mut paid_by_invoice: HashMap<Uuid, Decimal> = HashMap::new();
        for payment in &payments {
            *paid_by_invoice.entry(payment.invoice_id).or_default() += payment.amount;
        }

        let mut billed_by_trip: HashMap<Uuid, Decimal> = HashMap::new();
        for invoice in &invoices {
            if let Some(trip_id) = invoice.trip_id {
                *billed_by_trip.entry(trip_id).or_default() += invoice.total_amount;
            }
        }

        let customer_names = customers
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();

        Self {
            customers,
            trucks,
            drivers,
            trips,
            invoices,
            payments,
            paid_by_invoice,
            billed_by_trip,
            customer_names,
        }
    }

    /// Suma de pagos aplicados a una factura
    pub fn paid_amount(&self, invoice_id: Uuid) -> Decimal {
        self.paid_by_invoice
            .get(&invoice_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Importe pendiente: total menos pagos
    pub fn outstanding(&self, invoice: &Invoice) -> Decimal {
        invoice.total_amount - self.paid_amount(invoice.id)
    }

    /// Ingresos de un viaje: suma de los totales de sus facturas
    pub fn trip_revenue(&self, trip_id: Uuid) -> Decimal {
        self.billed_by_trip
            .get(&trip_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn customer_name(&self, customer_id: Uuid) -> String {
        self.customer_names
            .get(&customer_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn trip(&self, trip_id: Uuid) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == trip_id)
    }

    pub fn invoices_of_customer(&self, customer_id: Uuid) -> impl Iterator<Item = &Invoice> {
        self.invoices
            .iter()
            .filter(move |i| i.customer_id == customer_id)
    }

    pub fn trips_of_customer(&self, customer_id: Uuid) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(move |t| t.customer_id == customer_id)
    }

    pub fn trips_of_truck(&self, truck_id: Uuid) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(move |t| t.truck_id == truck_id)
    }

    pub fn trips_of_driver(&self, driver_id: Uuid) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(move |t| t.driver_id == driver_id)
    }
}
