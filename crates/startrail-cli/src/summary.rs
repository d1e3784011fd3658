use console::Style;
use startrail_core::filters::skyglow::SkyglowStrength;
use startrail_core::pipeline::config::RunConfig;
use startrail_core::pipeline::FadeMode;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &RunConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Star Trail"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(10)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Lights"),
        s.path.apply_to(config.light_frames.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    match (config.dark_frames.enabled, &config.dark_frames.dir) {
        (true, Some(dir)) => println!(
            "  {:<14}{}",
            s.label.apply_to("Darks"),
            s.path.apply_to(dir.display())
        ),
        _ => println!(
            "  {:<14}{}",
            s.label.apply_to("Darks"),
            s.disabled.apply_to("none")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Compositing"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(if config.merge_layers {
            "merged"
        } else {
            "layered"
        })
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Fade"),
        s.value.apply_to(config.fade)
    );
    match trail_label(config) {
        Some(label) => println!(
            "    {:<12}{}",
            s.label.apply_to("Trail"),
            s.value.apply_to(label)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Trail"),
            s.disabled.apply_to("unlimited")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Sky-glow"));
    if config.skyglow.strength == SkyglowStrength::None {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Strength"),
            s.disabled.apply_to("disabled")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Strength"),
            s.value.apply_to(config.skyglow.strength)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Radius"),
            s.value.apply_to(format!("{} px", config.skyglow.radius))
        );
    }
    println!();

    if let (true, Some(dir)) = (config.intermediate.enabled, &config.intermediate.dir) {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Snapshots"),
            s.path.apply_to(dir.display())
        );
    }
    if config.live_display {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Live view"),
            s.method.apply_to("on")
        );
    }
    println!();
}

/// Describe what the trail limit does for this run, or `None` when it has no
/// effect. In merged mode the limit only sets the fade length.
fn trail_label(config: &RunConfig) -> Option<String> {
    match (config.trail_limit, config.merge_layers, config.fade) {
        (0, _, _) => None,
        (limit, false, _) => Some(format!("{limit} frames")),
        (_, true, FadeMode::None) => None,
        (limit, true, _) => Some(format!("fade over {limit} frames")),
    }
}
