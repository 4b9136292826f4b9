//! Employee directory migration.
//!
//! Creates the employees table read by payroll reconciliation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS employees CASCADE;")
            .await?;
        Ok(())
    }
}

const EMPLOYEES_SQL: &str = r"
-- Employee directory; national_id holds the digits-only cedula
CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    national_id VARCHAR(20) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    position VARCHAR(100) NOT NULL DEFAULT '',
    base_salary NUMERIC(19, 4) NOT NULL,
    hired_on DATE NOT NULL DEFAULT CURRENT_DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_employees_national_id UNIQUE (national_id),
    CONSTRAINT chk_employees_national_id_digits CHECK (national_id ~ '^[0-9]+$'),
    CONSTRAINT chk_employees_base_salary_positive CHECK (base_salary > 0)
);

-- Directory listing order
CREATE INDEX idx_employees_full_name ON employees(full_name);
";
