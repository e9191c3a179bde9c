use crate::math::Rgb;
use crate::scene::{LightTuning, Lighting, Scene};
use crate::tunables::{self, Tunables};

pub const LIGHT_COLOR_KEY: &str = "lightColor";
pub const LIGHT_INTENSITY_KEY: &str = "lightIntensity";

/// Directional + ambient lights, with the directional light on the panel
pub fn add_light_rig(scene: &mut Scene, tunables: &mut Tunables) -> tunables::Result<()> {
    let mut lighting = Lighting::default();

    lighting.directional.color = tunables.register_color(LIGHT_COLOR_KEY, Rgb::WHITE)?;
    lighting.directional.intensity = tunables.register_number(LIGHT_INTENSITY_KEY, 0.5, 0.0, 5.0, 0.1)?;

    scene.lighting = lighting;
    scene.light_tuning = Some(LightTuning {
        color_key: LIGHT_COLOR_KEY.to_string(),
        intensity_key: LIGHT_INTENSITY_KEY.to_string(),
    });
    Ok(())
}

/// Named CSS color that is known to exist in the table
pub(crate) fn css(name: &str) -> Rgb {
    Rgb::named(name).unwrap_or(Rgb::WHITE)
}
