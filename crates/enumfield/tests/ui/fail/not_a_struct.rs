use enumfield::EnumFields;

#[derive(EnumFields)]
pub enum Gender {
    Male,
    Female,
}

fn main() {}
