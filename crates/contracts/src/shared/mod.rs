pub mod choice;
pub mod de;
pub mod envelope;
