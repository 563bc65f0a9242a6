use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_catalog(path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name", "price"])?;
    wtr.write_record(["p-1", "Burger", "9.90"])?;
    wtr.write_record(["p-2", "Fries", "4.25"])?;
    wtr.write_record(["p-3", "Soda", "3.00"])?;

    wtr.flush()?;
    Ok(())
}

pub fn write_customers(path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name"])?;
    wtr.write_record(["c-1", "Ana"])?;

    wtr.flush()?;
    Ok(())
}

pub fn write_commands(path: &Path, rows: &[[&str; 6]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["action", "customer", "order", "product", "quantity", "products"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
