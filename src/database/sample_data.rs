//! Datos de ejemplo para una instalación nueva
//!
//! Genera clientes, camiones, conductores, viajes, facturas y pagos
//! coherentes entre sí: el total de cada factura sale de
//! `Invoice::compute_total` y su estado de `InvoiceStatus::derive` sobre los
//! pagos generados. Solo se insertan si la tabla customers está vacía.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Customer, Driver, DriverStatus, Invoice, InvoiceStatus, Payment, PaymentMethod, Trip, TripStatus,
    Truck, TruckStatus, UserRole,
};
use crate::utils::errors::AppError;

/// Registros por entidad
pub const SAMPLE_SIZE: usize = 100;

const COMPANY_KINDS: [&str; 5] = ["Compañía", "Sociedad Limitada", "Sociedad Anónima", "Empresa", "Taller"];
const BUSINESSES: [&str; 5] = ["Construcción", "Materiales", "Equipos", "Mecánica", "Fontanería"];
const BRANDS: [(&str, &str); 8] = [
    ("Hyundai", "HD370"),
    ("Isuzu", "NPR 75"),
    ("Hino", "300 Series"),
    ("Fuso", "Canter"),
    ("Volvo", "FH"),
    ("Mercedes", "Actros"),
    ("MAN", "TGX"),
    ("Scania", "R Series"),
];
const PLATE_PREFIXES: [&str; 10] = ["51A", "51B", "51C", "51D", "51E", "51F", "51G", "51H", "51K", "51L"];
const FIRST_NAMES: [&str; 8] = ["Juan", "María", "Luis", "Ana", "Pedro", "Lucía", "Carlos", "Elena"];
const LAST_NAMES: [&str; 8] = ["García", "López", "Martínez", "Sánchez", "Pérez", "Gómez", "Díaz", "Romero"];
const CITIES: [&str; 10] = [
    "Madrid", "Barcelona", "Valencia", "Sevilla", "Zaragoza", "Málaga", "Bilbao", "Murcia", "Valladolid", "Vigo",
];
const PAYMENT_METHODS: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::BankTransfer, PaymentMethod::Check];

#[derive(Debug, Default)]
pub struct SampleData {
    pub customers: Vec<Customer>,
    pub trucks: Vec<Truck>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
}

impl SampleData {
    pub fn len(&self) -> usize {
        self.customers.len()
            + self.trucks.len()
            + self.drivers.len()
            + self.trips.len()
            + self.invoices.len()
            + self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Genera `count` registros de cada entidad. Los viajes solo usan camiones
/// `Available`/`InUse` y conductores `Available`/`OnTrip`.
pub fn generate<R: Rng>(rng: &mut R, count: usize, dispatcher_id: Option<Uuid>, now: DateTime<Utc>) -> SampleData {
    let customers: Vec<Customer> = (1..=count).map(|i| sample_customer(rng, i, now)).collect();
    let trucks: Vec<Truck> = (1..=count).map(|i| sample_truck(rng, i, now)).collect();
    let drivers: Vec<Driver> = (1..=count).map(|i| sample_driver(rng, i, now)).collect();

    let usable_trucks: Vec<&Truck> = trucks
        .iter()
        .filter(|t| matches!(t.status, TruckStatus::Available | TruckStatus::InUse))
        .collect();
    let usable_drivers: Vec<&Driver> = drivers
        .iter()
        .filter(|d| matches!(d.status, DriverStatus::Available | DriverStatus::OnTrip))
        .collect();

    let mut trips = Vec::new();
    if !customers.is_empty() && !usable_trucks.is_empty() && !usable_drivers.is_empty() {
        for i in 1..=count {
            let customer = &customers[rng.gen_range(0..customers.len())];
            let truck = usable_trucks[rng.gen_range(0..usable_trucks.len())];
            let driver = usable_drivers[rng.gen_range(0..usable_drivers.len())];
            trips.push(sample_trip(rng, i, customer.id, truck.id, driver.id, dispatcher_id, now));
        }
    }

    let completed: Vec<&Trip> = trips.iter().filter(|t| t.status == TripStatus::Completed).collect();
    let mut invoices: Vec<Invoice> = Vec::new();
    if !customers.is_empty() {
        for i in 1..=count {
            let customer = &customers[rng.gen_range(0..customers.len())];
            let trip = if !completed.is_empty() && rng.gen_bool(0.7) {
                Some(completed[rng.gen_range(0..completed.len())])
            } else {
                None
            };
            invoices.push(sample_invoice(rng, i, customer.id, trip, now));
        }
    }

    let payments = sample_payments(rng, count, &invoices, now);

    let mut paid: HashMap<Uuid, Decimal> = HashMap::new();
    for payment in &payments {
        *paid.entry(payment.invoice_id).or_default() += payment.amount;
    }
    for invoice in &mut invoices {
        let paid = paid.get(&invoice.id).copied().unwrap_or(Decimal::ZERO);
        invoice.status = InvoiceStatus::derive(paid, invoice.total_amount, invoice.due_date, now);
    }

    SampleData { customers, trucks, drivers, trips, invoices, payments }
}

fn sample_customer<R: Rng>(rng: &mut R, i: usize, now: DateTime<Utc>) -> Customer {
    let kind = pick(rng, &COMPANY_KINDS);
    let business = pick(rng, &BUSINESSES);
    let name = format!("{} {} {:03}", kind, business, i);

    Customer {
        id: Uuid::new_v4(),
        name: name.clone(),
        company_name: Some(name),
        phone: format!("6{:08}", rng.gen_range(10_000_000..100_000_000)),
        email: Some(format!("customer{}@example.com", i)),
        address: format!("Calle {} {}, {}", business, rng.gen_range(1..999), pick(rng, &CITIES)),
        tax_code: Some(format!("B{:08}", rng.gen_range(10_000_000..100_000_000))),
        notes: (i % 10 == 0).then(|| format!("Cliente VIP {}", i)),
        created_at: now - Duration::days(rng.gen_range(90..365)),
        updated_at: None,
    }
}

fn sample_truck<R: Rng>(rng: &mut R, i: usize, now: DateTime<Utc>) -> Truck {
    let (brand, model) = pick(rng, &BRANDS);
    let last = now - Duration::days(rng.gen_range(0..90));
    let interval = rng.gen_range(60..120);

    Truck {
        id: Uuid::new_v4(),
        license_plate: format!("{}-{:05}", pick(rng, &PLATE_PREFIXES), 10_000 + i),
        brand: brand.to_string(),
        model: model.to_string(),
        year: rng.gen_range(2015..2024),
        capacity: Decimal::new(rng.gen_range(500..2000), 2),
        status: pick(rng, &TruckStatus::ALL),
        last_maintenance_date: Some(last),
        next_maintenance_date: Truck::scheduled_next_maintenance(Some(last), Some(interval)),
        maintenance_interval_days: Some(interval),
        notes: (i % 20 == 0).then(|| format!("Revisión periódica pendiente {}", i)),
        created_at: now - Duration::days(rng.gen_range(180..720)),
        updated_at: None,
    }
}

fn sample_driver<R: Rng>(rng: &mut R, i: usize, now: DateTime<Utc>) -> Driver {
    let expiry = now + Duration::days(rng.gen_range(-365..1095));

    Driver {
        id: Uuid::new_v4(),
        full_name: format!("{} {} {:03}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES), i),
        phone: format!("6{:08}", rng.gen_range(10_000_000..100_000_000)),
        email: Some(format!("driver{}@example.com", i)),
        license_number: format!("DL{:06}", 100_000 + i),
        license_expiry_date: expiry,
        address: Some(format!("Avenida {}, {}", rng.gen_range(1..999), pick(rng, &CITIES))),
        status: pick(rng, &DriverStatus::ALL),
        assigned_truck_id: None,
        notes: (expiry < now + Duration::days(30)).then(|| format!("Licencia por vencer {}", i)),
        created_at: now - Duration::days(rng.gen_range(90..720)),
        updated_at: None,
    }
}

fn sample_trip<R: Rng>(
    rng: &mut R,
    i: usize,
    customer_id: Uuid,
    truck_id: Uuid,
    driver_id: Uuid,
    dispatcher_id: Option<Uuid>,
    now: DateTime<Utc>,
) -> Trip {
    let origin = pick(rng, &CITIES);
    let destination = loop {
        let city = pick(rng, &CITIES);
        if city != origin {
            break city;
        }
    };
    let scheduled = now + Duration::days(rng.gen_range(-30..60));
    let status = pick(rng, &TripStatus::ALL);
    let distance: i64 = rng.gen_range(50..2000);
    let completed = status == TripStatus::Completed;

    let actual_start_date = matches!(status, TripStatus::InProgress | TripStatus::Completed)
        .then(|| scheduled + Duration::hours(rng.gen_range(0..12)));
    let actual_end_date = if completed {
        actual_start_date.map(|start| start + Duration::hours(rng.gen_range(8..48)))
    } else {
        None
    };

    Trip {
        id: Uuid::new_v4(),
        trip_number: format!("TRP-{}-{:04}", scheduled.format("%Y%m%d"), i),
        customer_id,
        truck_id,
        driver_id,
        dispatcher_id,
        origin: origin.to_string(),
        destination: destination.to_string(),
        scheduled_date: scheduled,
        actual_start_date,
        actual_end_date,
        status,
        distance: Decimal::from(distance),
        fuel_cost: completed.then(|| Decimal::from(distance * rng.gen_range(2..5))),
        other_costs: (completed && rng.gen_bool(0.3)).then(|| Decimal::from(rng.gen_range(50..500i64))),
        notes: (i % 10 == 0).then(|| format!("Envío especial {}", i)),
        created_at: scheduled - Duration::days(rng.gen_range(1..10)),
        updated_at: None,
    }
}

fn sample_invoice<R: Rng>(
    rng: &mut R,
    i: usize,
    customer_id: Uuid,
    trip: Option<&Trip>,
    now: DateTime<Utc>,
) -> Invoice {
    let issue = now + Duration::days(rng.gen_range(-90..30));
    let due = issue + Duration::days(rng.gen_range(15..60));
    let amount = Decimal::from(rng.gen_range(1_000..50_000i64));
    let tax_amount = Some(amount / Decimal::from(10));

    Invoice {
        id: Uuid::new_v4(),
        invoice_number: format!("INV-{}-{:04}", issue.format("%Y%m%d"), i),
        customer_id,
        trip_id: trip.map(|t| t.id),
        issue_date: issue,
        due_date: due,
        amount,
        tax_amount,
        total_amount: Invoice::compute_total(amount, tax_amount),
        status: InvoiceStatus::Pending,
        description: Some(match trip {
            Some(trip) => format!("Factura del viaje {}", trip.trip_number),
            None => format!("Factura de servicio {}", i),
        }),
        notes: (i % 10 == 0).then(|| format!("Factura a revisar {}", i)),
        created_at: issue,
        updated_at: None,
    }
}

/// Pagos sobre facturas ya emitidas, sin superar nunca lo pendiente
fn sample_payments<R: Rng>(rng: &mut R, count: usize, invoices: &[Invoice], now: DateTime<Utc>) -> Vec<Payment> {
    let issued: Vec<&Invoice> = invoices.iter().filter(|i| i.issue_date <= now).collect();
    if issued.is_empty() {
        return Vec::new();
    }

    let mut remaining: HashMap<Uuid, Decimal> = issued.iter().map(|i| (i.id, i.total_amount)).collect();
    let mut payments = Vec::new();

    for i in 1..=count {
        let invoice = issued[rng.gen_range(0..issued.len())];
        let left = remaining.get(&invoice.id).copied().unwrap_or(Decimal::ZERO);
        let share = Decimal::from(rng.gen_range(10..=100i64));
        let amount = (left * share / Decimal::from(100)).round_dp(2);
        if amount <= Decimal::ZERO {
            continue;
        }
        remaining.insert(invoice.id, left - amount);

        let date = (invoice.issue_date + Duration::days(rng.gen_range(0..90))).min(now);
        payments.push(Payment {
            id: Uuid::new_v4(),
            payment_number: format!("PAY-{}-{:04}", date.format("%Y%m%d"), i),
            invoice_id: invoice.id,
            payment_date: date,
            amount,
            payment_method: pick(rng, &PAYMENT_METHODS),
            reference_number: rng.gen_bool(0.5).then(|| format!("REF{}", rng.gen_range(100_000..1_000_000))),
            notes: (i % 10 == 0).then(|| format!("Pago especial {}", i)),
            created_at: date,
            updated_at: None,
        });
    }

    payments
}

fn pick<R: Rng, T: Copy, const N: usize>(rng: &mut R, items: &[T; N]) -> T {
    items[rng.gen_range(0..N)]
}

/// Inserta los datos de ejemplo si no hay clientes. Devuelve cuántas filas se crearon.
pub async fn seed_sample_data(pool: &PgPool, now: DateTime<Utc>) -> Result<usize, AppError> {
    let (has_customers,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers)")
        .fetch_one(pool)
        .await?;
    if has_customers {
        return Ok(0);
    }

    let dispatcher: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE role = $1 ORDER BY created_at LIMIT 1")
        .bind(UserRole::Dispatcher)
        .fetch_optional(pool)
        .await?;

    let data = {
        let mut rng = StdRng::from_entropy();
        generate(&mut rng, SAMPLE_SIZE, dispatcher.map(|(id,)| id), now)
    };

    let mut tx = pool.begin().await?;
    insert_all(&mut tx, &data).await?;
    tx.commit().await?;

    info!(
        "🌱 Datos de ejemplo: {} clientes, {} camiones, {} conductores, {} viajes, {} facturas, {} pagos",
        data.customers.len(),
        data.trucks.len(),
        data.drivers.len(),
        data.trips.len(),
        data.invoices.len(),
        data.payments.len()
    );
    Ok(data.len())
}

async fn insert_all(tx: &mut Transaction<'_, Postgres>, data: &SampleData) -> Result<(), AppError> {
    for c in &data.customers {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, company_name, phone, email, address, tax_code, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(c.id)
        .bind(&c.name)
        .bind(&c.company_name)
        .bind(&c.phone)
        .bind(&c.email)
        .bind(&c.address)
        .bind(&c.tax_code)
        .bind(&c.notes)
        .bind(c.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for t in &data.trucks {
        sqlx::query(
            r#"
            INSERT INTO trucks (id, license_plate, brand, model, year, capacity, status,
                                last_maintenance_date, next_maintenance_date, maintenance_interval_days,
                                notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(t.id)
        .bind(&t.license_plate)
        .bind(&t.brand)
        .bind(&t.model)
        .bind(t.year)
        .bind(t.capacity)
        .bind(t.status)
        .bind(t.last_maintenance_date)
        .bind(t.next_maintenance_date)
        .bind(t.maintenance_interval_days)
        .bind(&t.notes)
        .bind(t.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for d in &data.drivers {
        sqlx::query(
            r#"
            INSERT INTO drivers (id, full_name, phone, email, license_number, license_expiry_date,
                                 address, status, assigned_truck_id, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(d.id)
        .bind(&d.full_name)
        .bind(&d.phone)
        .bind(&d.email)
        .bind(&d.license_number)
        .bind(d.license_expiry_date)
        .bind(&d.address)
        .bind(d.status)
        .bind(d.assigned_truck_id)
        .bind(&d.notes)
        .bind(d.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for t in &data.trips {
        sqlx::query(
            r#"
            INSERT INTO trips (id, trip_number, customer_id, truck_id, driver_id, dispatcher_id,
                               origin, destination, scheduled_date, actual_start_date, actual_end_date,
                               status, distance, fuel_cost, other_costs, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(t.id)
        .bind(&t.trip_number)
        .bind(t.customer_id)
        .bind(t.truck_id)
        .bind(t.driver_id)
        .bind(t.dispatcher_id)
        .bind(&t.origin)
        .bind(&t.destination)
        .bind(t.scheduled_date)
        .bind(t.actual_start_date)
        .bind(t.actual_end_date)
        .bind(t.status)
        .bind(t.distance)
        .bind(t.fuel_cost)
        .bind(t.other_costs)
        .bind(&t.notes)
        .bind(t.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for i in &data.invoices {
        sqlx::query(
            r#"
            INSERT INTO invoices (id, invoice_number, customer_id, trip_id, issue_date, due_date,
                                  amount, tax_amount, total_amount, status, description, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(i.id)
        .bind(&i.invoice_number)
        .bind(i.customer_id)
        .bind(i.trip_id)
        .bind(i.issue_date)
        .bind(i.due_date)
        .bind(i.amount)
        .bind(i.tax_amount)
        .bind(i.total_amount)
        .bind(i.status)
        .bind(&i.description)
        .bind(&i.notes)
        .bind(i.created_at)
        .execute(&mut **tx)
        .await?;
    }

    for p in &data.payments {
        sqlx::query(
            r#"
            INSERT INTO payments (id, payment_number, invoice_id, payment_date, amount,
                                  payment_method, reference_number, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(p.id)
        .bind(&p.payment_number)
        .bind(p.invoice_id)
        .bind(p.payment_date)
        .bind(p.amount)
        .bind(p.payment_method)
        .bind(&p.reference_number)
        .bind(&p.notes)
        .bind(p.created_at)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{dashboard, ReportSnapshot};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample(seed: u64) -> SampleData {
        generate(&mut StdRng::seed_from_u64(seed), SAMPLE_SIZE, Some(Uuid::new_v4()), now())
    }

    #[test]
    fn test_generates_every_collection() {
        let data = sample(7);

        assert_eq!(data.customers.len(), SAMPLE_SIZE);
        assert_eq!(data.trucks.len(), SAMPLE_SIZE);
        assert_eq!(data.drivers.len(), SAMPLE_SIZE);
        assert_eq!(data.trips.len(), SAMPLE_SIZE);
        assert_eq!(data.invoices.len(), SAMPLE_SIZE);
        assert!(!data.payments.is_empty());
        assert!(data.payments.len() <= SAMPLE_SIZE);
    }

    #[test]
    fn test_unique_columns_do_not_collide() {
        let data = sample(11);

        let plates: HashSet<_> = data.trucks.iter().map(|t| &t.license_plate).collect();
        let licenses: HashSet<_> = data.drivers.iter().map(|d| &d.license_number).collect();
        let trips: HashSet<_> = data.trips.iter().map(|t| &t.trip_number).collect();
        let invoices: HashSet<_> = data.invoices.iter().map(|i| &i.invoice_number).collect();
        let payments: HashSet<_> = data.payments.iter().map(|p| &p.payment_number).collect();

        assert_eq!(plates.len(), data.trucks.len());
        assert_eq!(licenses.len(), data.drivers.len());
        assert_eq!(trips.len(), data.trips.len());
        assert_eq!(invoices.len(), data.invoices.len());
        assert_eq!(payments.len(), data.payments.len());
    }

    #[test]
    fn test_invoice_totals_and_statuses_follow_payments() {
        let data = sample(23);

        for invoice in &data.invoices {
            assert_eq!(invoice.total_amount, Invoice::compute_total(invoice.amount, invoice.tax_amount));

            let paid: Decimal = data
                .payments
                .iter()
                .filter(|p| p.invoice_id == invoice.id)
                .map(|p| p.amount)
                .sum();
            assert!(paid <= invoice.total_amount);
            assert_eq!(
                invoice.status,
                InvoiceStatus::derive(paid, invoice.total_amount, invoice.due_date, now())
            );
        }
        assert!(data.payments.iter().all(|p| p.amount > Decimal::ZERO && p.payment_date <= now()));
    }

    #[test]
    fn test_trips_use_operable_trucks_and_drivers() {
        let data = sample(42);
        let trucks: HashMap<_, _> = data.trucks.iter().map(|t| (t.id, t.status)).collect();
        let drivers: HashMap<_, _> = data.drivers.iter().map(|d| (d.id, d.status)).collect();

        for trip in &data.trips {
            assert_ne!(trip.origin, trip.destination);
            assert!(matches!(trucks[&trip.truck_id], TruckStatus::Available | TruckStatus::InUse));
            assert!(matches!(drivers[&trip.driver_id], DriverStatus::Available | DriverStatus::OnTrip));
            assert_eq!(trip.actual_end_date.is_some(), trip.status == TripStatus::Completed);
            if let (Some(start), Some(end)) = (trip.actual_start_date, trip.actual_end_date) {
                assert!(start < end);
            }
        }
    }

    #[test]
    fn test_empty_count_yields_nothing() {
        let data = generate(&mut StdRng::seed_from_u64(1), 0, None, now());
        assert!(data.is_empty());
    }

    #[test]
    fn test_sample_feeds_the_dashboard() {
        let data = sample(5);
        let snapshot = ReportSnapshot::new(
            data.customers,
            data.trucks,
            data.drivers,
            data.trips,
            data.invoices,
            data.payments,
        );

        let dashboard = dashboard::build(&snapshot, now());
        assert_eq!(dashboard.summary.total_customers, SAMPLE_SIZE);
        assert_eq!(dashboard.recent_trips.len(), 10);
        assert!(dashboard.summary.total_outstanding_debt > Decimal::ZERO);
    }
}
