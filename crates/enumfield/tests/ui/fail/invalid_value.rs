use enumfield::EnumFields;

#[derive(EnumFields)]
pub struct Product {
    #[enum_field(values("in stock", "sold-out!"))]
    pub availability: String,
}

fn main() {}
