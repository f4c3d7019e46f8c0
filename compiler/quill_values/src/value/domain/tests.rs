use super::*;
use pretty_assertions::assert_eq;

#[test]
fn changers_compose_in_order() {
    let bold = Changer::new("bold", vec![]);
    let colour = Changer::new("text-colour", vec![Value::string("red")]);
    let both = bold.combine(&colour);
    assert_eq!(both.calls.len(), 2);
    assert_eq!(both.describe(), "(bold:)-and-(text-colour:)");
    assert_eq!(both.to_string(), "(bold:) + (text-colour: \"red\")");
}

#[test]
fn colours_mix_by_averaging() {
    let mixed = Colour::rgb(255, 0, 100).mix(Colour::rgba(1, 200, 100, 0.5));
    assert_eq!(mixed, Colour::rgba(128, 100, 100, 0.75));
}

#[test]
fn colour_renders_alpha_only_when_translucent() {
    assert_eq!(Colour::rgb(1, 2, 3).to_string(), "(rgb: 1, 2, 3)");
    assert_eq!(Colour::rgba(1, 2, 3, 0.5).to_string(), "(rgba: 1, 2, 3, 0.5)");
}

#[test]
fn gradient_renders_stops() {
    let g = Gradient {
        angle: 90.0,
        stops: vec![
            GradientStop {
                position: 0.0,
                colour: Colour::rgb(0, 0, 0),
            },
            GradientStop {
                position: 1.0,
                colour: Colour::rgb(255, 255, 255),
            },
        ],
    };
    assert_eq!(
        g.to_string(),
        "(gradient: 90, 0, (rgb: 0, 0, 0), 1, (rgb: 255, 255, 255))"
    );
}

#[test]
fn command_and_hook_render_as_source() {
    let cmd = Command {
        name: "go-to".into(),
        args: vec![Value::string("Cellar")],
    };
    assert_eq!(cmd.to_string(), "(go-to: \"Cellar\")");
    let hook = CodeHook {
        source: "Hello".into(),
    };
    assert_eq!(hook.to_string(), "[Hello]");
}
