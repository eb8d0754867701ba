//! Static car catalogue shown on the dashboard.
//!
//! Presentation content only: nothing here is ever rented, reserved or
//! otherwise mutated.

use std::sync::LazyLock;

use serde::Serialize;

/// One entry of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Car {
    pub name: &'static str,
    /// File name under `static/cars/`, or an absolute URL.
    pub image: &'static str,
}

/// Image shown for cars without an entry in [`CAR_IMAGES`].
pub const FALLBACK_IMAGE: &str = "image.png";

/// Display order of the catalogue.
const CAR_NAMES: &[&str] = &[
    "ORACLE REDBULL RB20",
    "AMG GLS",
    "FERRARI 296 GTB",
    "APX GP",
    "MCLAREN 720S",
    "LAMBORGHINI HURACÁN",
    "BUGATTI CHIRON",
    "ASTON MARTIN VANTAGE",
    "PORSCHE 911",
    "BMW M3",
    "AUDI R8",
];

const CAR_IMAGES: &[(&str, &str)] = &[
    ("ORACLE REDBULL RB20", "ORACLE REDBULL RB20.jpg"),
    ("AMG GLS", "AMG GLS.jpeg"),
    ("FERRARI 296 GTB", "FERRARI 296 GTB.jpg"),
    ("APX GP", "apx gp.jpg"),
    ("MCLAREN 720S", "MCLAREN 720S.jpeg"),
    ("LAMBORGHINI HURACÁN", "LAMBORGHINI HURACÁN.jpeg"),
    ("BUGATTI CHIRON", "BUGATTI CHIRON.jpeg"),
    (
        "ASTON MARTIN VANTAGE",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5a/2019_Aston_Martin_Vantage_V8_Automatic_4.0_Front.jpg/640px-2019_Aston_Martin_Vantage_V8_Automatic_4.0_Front.jpg",
    ),
    ("PORSCHE 911", "PORSCHE 911.jpeg"),
    ("BMW M3", "BMW M3.jpeg"),
    ("AUDI R8", "AUDI R8.jpeg"),
];

static CARS: LazyLock<Vec<Car>> = LazyLock::new(|| {
    CAR_NAMES
        .iter()
        .map(|&name| Car {
            name,
            image: image_for(name),
        })
        .collect()
});

/// Image reference for `name`, or [`FALLBACK_IMAGE`] when it has none.
pub fn image_for(name: &str) -> &'static str {
    CAR_IMAGES
        .iter()
        .find(|(car, _)| *car == name)
        .map_or(FALLBACK_IMAGE, |&(_, image)| image)
}

/// Every car in display order.
pub fn all() -> &'static [Car] {
    &CARS
}

/// Cars whose name contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn filter(query: &str) -> Vec<Car> {
    let needle = query.trim().to_lowercase();
    all()
        .iter()
        .filter(|car| car.name.to_lowercase().contains(&needle))
        .copied()
        .collect()
}
