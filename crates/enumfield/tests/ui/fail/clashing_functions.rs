use enumfield::EnumFields;

#[derive(EnumFields)]
pub struct Badge {
    #[enum_field(values("male"))]
    pub gender: String,

    #[enum_field(values("is male"))]
    pub label: String,
}

fn main() {}
