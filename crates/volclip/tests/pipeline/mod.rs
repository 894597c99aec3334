mod clip_scenarios;
mod mask_properties;
mod reconstruction_properties;
mod support;
mod tag_round_trip;
