//! # Catalog Fixtures
//!
//! Hard-coded categories and products standing in for a catalog service.
//!
//! Product order here is catalog order: featured products first, then each
//! category shelf in category order.

use crate::{Category, Money, Product, Rating};

const UNSPLASH: &str = "https://images.unsplash.com";

fn image(photo: &str) -> String {
    format!("{UNSPLASH}/{photo}?w=500&auto=format")
}

/// The four storefront categories, in display order.
#[must_use]
pub fn categories() -> Vec<Category> {
    vec![
        Category::new(
            "fruits-vegetables",
            "Fruits & Vegetables",
            image("photo-1610832958506-aa56368176cf"),
        ),
        Category::new(
            "dairy-bread-eggs",
            "Dairy, Bread & Eggs",
            image("photo-1488477181946-6428a0291777"),
        ),
        Category::new(
            "pharmacy",
            "Pharmacy",
            image("photo-1631549916768-4119b4123a21"),
        ),
        Category::new(
            "pet-care",
            "Pet Care",
            image("photo-1450778869180-41d0601e046e"),
        ),
    ]
}

/// Every product, in catalog order.
#[must_use]
pub fn products() -> Vec<Product> {
    let mut all = featured();
    all.extend(fruits_vegetables());
    all.extend(dairy_bread_eggs());
    all.extend(pharmacy());
    all.extend(pet_care());
    all
}

fn featured() -> Vec<Product> {
    vec![
        Product::new(
            "1",
            "Organic Bananas",
            Money::from_rupees(40),
            "500g",
            image("photo-1603833665858-e61d17a86224"),
            "fruits-vegetables",
        )
        .featured(),
        Product::new(
            "2",
            "Fresh Milk",
            Money::from_rupees(65),
            "1L",
            image("photo-1563636619-e9143da7973b"),
            "dairy-bread-eggs",
        )
        .featured(),
        Product::new(
            "3",
            "Whole Wheat Bread",
            Money::from_rupees(35),
            "400g",
            image("photo-1509440159596-0249088772ff"),
            "dairy-bread-eggs",
        )
        .featured(),
        Product::new(
            "4",
            "Farm Fresh Eggs",
            Money::from_rupees(75),
            "12 pcs",
            image("photo-1518569656558-1f25e69d93d7"),
            "dairy-bread-eggs",
        )
        .featured(),
    ]
}

fn fruits_vegetables() -> Vec<Product> {
    let shelf = "fruits-vegetables";
    vec![
        Product::new("fv1", "Fresh Apples", Money::from_rupees(120), "1kg", image("photo-1619546813926-a78fa6372cd2"), shelf),
        Product::new("fv2", "Organic Carrots", Money::from_rupees(45), "500g", image("photo-1598170845058-32b9d6a5da37"), shelf),
        Product::new("fv3", "Fresh Tomatoes", Money::from_rupees(35), "500g", image("photo-1518977822534-7049a61ee0c2"), shelf),
        Product::new("fv4", "Green Spinach", Money::from_rupees(30), "250g", image("photo-1576045057995-568f588f82fb"), shelf),
    ]
}

fn dairy_bread_eggs() -> Vec<Product> {
    let shelf = "dairy-bread-eggs";
    vec![
        Product::new("db1", "Greek Yogurt", Money::from_rupees(85), "400g", image("photo-1488477181946-6428a0291777"), shelf),
        Product::new("db2", "Cheese Slices", Money::from_rupees(120), "200g", image("photo-1486297678162-eb2a19b0a32d"), shelf),
        Product::new("db3", "Butter", Money::from_rupees(95), "500g", image("photo-1589985270826-4b7bb135bc9d"), shelf),
        Product::new("db4", "Brown Bread", Money::from_rupees(45), "400g", image("photo-1598373182133-52452b9a1624"), shelf),
    ]
}

fn pharmacy() -> Vec<Product> {
    let shelf = "pharmacy";
    vec![
        Product::new("med1", "Tylenol Extra Strength", Money::from_rupees(299), "100 tablets", image("photo-1584308666744-24d5c474f2ae"), shelf)
            .with_description("Fast pain relief for headaches and fever"),
        Product::new("med2", "First Aid Kit", Money::from_rupees(599), "Complete Set", image("photo-1603398938378-e54eab446dde"), shelf)
            .with_description("Essential first aid supplies for emergencies"),
        Product::new("med3", "Multivitamin Complex", Money::from_rupees(449), "60 capsules", image("photo-1626765674872-6716cc0e0abb"), shelf)
            .with_description("Daily essential vitamins and minerals"),
        Product::new("med4", "Hand Sanitizer", Money::from_rupees(149), "500ml", image("photo-1584483766114-2cea6facdf57"), shelf)
            .with_description("99.9% germ protection"),
    ]
}

fn pet_care() -> Vec<Product> {
    let shelf = "pet-care";
    vec![
        Product::new("pet1", "Premium Dog Food", Money::from_rupees(899), "3kg", image("photo-1589924691995-400dc9ecc119"), shelf)
            .with_description("Complete nutrition for adult dogs")
            .with_rating(Rating::from_tenths(48)),
        Product::new("pet2", "Cat Grooming Kit", Money::from_rupees(599), "Set of 5", image("photo-1583511655857-d19b40a7a54e"), shelf)
            .with_description("Essential grooming tools for cats")
            .with_rating(Rating::from_tenths(45)),
        Product::new("pet3", "Pet Dental Care", Money::from_rupees(299), "100g", image("photo-1548199973-03cce0bbc87b"), shelf)
            .with_description("Dental hygiene for pets")
            .with_rating(Rating::from_tenths(46)),
        Product::new("pet4", "Interactive Pet Toy", Money::from_rupees(399), "1 piece", image("photo-1576201836106-db1758fd1c97"), shelf)
            .with_description("Engaging toy for mental stimulation")
            .with_rating(Rating::from_tenths(47)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twenty_products() {
        assert_eq!(products().len(), 20);
        assert_eq!(categories().len(), 4);
    }

    #[test]
    fn featured_products_come_first() {
        let all = products();
        assert!(all[..4].iter().all(|p| p.featured));
        assert!(all[4..].iter().all(|p| !p.featured));
    }
}
