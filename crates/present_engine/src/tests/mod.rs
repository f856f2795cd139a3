//! Frame-level scenarios across the scheduler, collision, game and renderer

mod frame_scenarios;
