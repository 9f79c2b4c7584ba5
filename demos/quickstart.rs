use unitick::{arange, Casting, Datetime64, Resolution, TemporalInput, Timedelta64, Unit};

fn main() {
    let launch: Datetime64 = "1969-07-16T13:32:00".parse().unwrap();
    let splashdown: Datetime64 = "1969-07-24T16:50:35".parse().unwrap();

    let mission = splashdown.checked_diff(launch).unwrap();
    println!("launch:     {launch}");
    println!("splashdown: {splashdown}");
    println!("duration:   {mission}");

    let hours = launch.cast(Resolution::of(Unit::Hour), Casting::Safe).unwrap();
    println!("launch hour tick: {} at {}", hours.tick(), hours.resolution());

    let step = TemporalInput::Timedelta(Timedelta64::from_raw(2, Resolution::of(Unit::Day)));
    let range = arange(
        Some(&TemporalInput::Str("1969-07-16")),
        Some(&TemporalInput::Str("1969-07-25")),
        Some(&step),
        None,
    )
    .unwrap();
    println!("every other mission day ({}):", range.resolution.bare());
    for tick in &range.ticks {
        let day = Datetime64::from_raw(*tick, range.resolution);
        println!("  {day}");
    }
}
