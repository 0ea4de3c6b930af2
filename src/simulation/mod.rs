pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod seeding;
pub mod orbits;
pub mod clock;
pub mod scenario;
pub mod stepper;
