//! Seeds the employee directory with the bakery roster.
//!
//! Every employee is upserted with the same base salary, so re-running the
//! seeder resets salaries without duplicating rows.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use nomina_db::{EmployeeRepository, UpsertEmployeeInput};
use rust_decimal::Decimal;

/// Base salary given to every seeded employee.
const SEED_BASE_SALARY: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// (full name, national id, position)
const ROSTER: &[(&str, &str, &str)] = &[
    ("AMILCAR MORILLO", "15704205", "Panadero"),
    ("EDGAR MORILLO", "9508834", "Ayudante"),
    ("ALEXANDER CASTILLO", "16840985", "Hornero"),
    ("JOSE MANUEL GOMEZ", "26565973", "Despachador"),
    ("JOSE LUIS SANCHEZ", "14490452", "Mantenimiento"),
    ("YOHANNY RIVERO", "32208224", "Cajero"),
    ("YLMAR DURAN", "17103663", "Pastelero"),
    ("ALEXANDER DURAN", "17103664", "Ayudante"),
    ("GILBERTO SANGRONIS", "17102897", "Seguridad"),
    ("NESTOR GONZALEZ", "28568950", "Chofer"),
    ("EDUARDO GOMEZ", "18888921", "Gerente"),
    ("MARIBEL SANCHEZ", "16707905", "Limpieza"),
    ("JOSE PALMERA", "28235467", "Ayudante"),
    ("ANDREINA RIVERO", "25784054", "Empleado"),
    ("EDGAR YSEA", "7344021", "Empleado"),
    ("JOSE GONZALEZ", "19251021", "Empleado"),
    ("ZURIMA MORALES", "18770631", "Empleado"),
    ("YANELIS FALCON", "6983493", "Empleado"),
    ("JUAN ROMERO", "5295436", "Empleado"),
    ("JOSE GUTIERREZ", "24562328", "Empleado"),
    ("NEXIS ALVAREZ", "18888919", "Empleado"),
    ("NORELY VARGAS", "22602224", "Empleado"),
    ("IVAN GONZALEZ", "21545430", "Empleado"),
    ("CARLOS CORDERO", "32149150", "Empleado"),
    ("SONIA REYES", "20932672", "Empleado"),
    ("PEDRO GRANDA", "19180635", "Empleado"),
    ("NOHELY MORALES", "24624552", "Empleado"),
    ("IRAIDA JIMENEZ", "14733189", "Empleado"),
    ("NORBELYS JIMENEZ", "24581899", "Empleado"),
    ("ISMELDA VARGAS", "9621218", "Empleado"),
    ("CARLOS BETANCOURT", "32149064", "Empleado"),
    ("JEURIS PEÑA", "32216755", "Empleado"),
    ("MILEXI ROMERO", "18888902", "Empleado"),
    ("JUAN C PALENCIA", "27116762", "Empleado"),
    ("EDUARDO GOMEZ", "32216762", "Empleado"),
    ("YOHANDERSON LOAIZA", "27843650", "Empleado"),
    ("LUIS CALDAS", "18479302", "Empleado"),
    ("LUIISA CORDERO", "27843553", "Empleado"),
    ("WUILME JIMENEZ", "16274652", "Empleado"),
    ("MARIA PEREIRA", "25128087", "Empleado"),
    ("NORELBYS RIVERO", "16707936", "Empleado"),
    ("GENESIS RIOS", "28634165", "Empleado"),
    ("YOSELIMAR HERNANDEZ", "32216890", "Empleado"),
    ("CARLOS LOAIZA", "27924393", "Empleado"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let repo = EmployeeRepository::new(nomina_db::connect(&database_url).await?);

    let hired_on = NaiveDate::from_ymd_opt(2024, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid hire date"))?;

    println!("Seeding employees...");
    let mut seeded = 0;
    for (full_name, national_id, position) in ROSTER {
        let input = UpsertEmployeeInput {
            national_id: (*national_id).to_string(),
            full_name: (*full_name).to_string(),
            position: (*position).to_string(),
            base_salary: SEED_BASE_SALARY,
            hired_on,
        };

        match repo.upsert(input).await {
            Ok(_) => seeded += 1,
            Err(e) => eprintln!("Failed to seed employee {national_id}: {e}"),
        }
    }

    println!("Seeding complete: {seeded}/{} employees", ROSTER.len());
    Ok(())
}
