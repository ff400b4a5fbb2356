//! Built-in demo scenes.

use std::sync::Arc;

use crate::{Hittable, Light, Material, Scene, SceneError, Sphere, Vec3};

/// A sphere the host bobs up and down between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedSphere {
    /// Position in the scene's primitive list
    pub index: usize,
    /// Center at time zero
    pub base_center: Vec3,
    /// Center as of the last update
    current_center: Vec3,
}

impl AnimatedSphere {
    pub fn new(index: usize, base_center: Vec3) -> Self {
        Self {
            index,
            base_center,
            current_center: base_center,
        }
    }

    pub fn current_center(&self) -> Vec3 {
        self.current_center
    }

    /// Center at `seconds`: the base height plus `sin(seconds)`.
    pub fn center_at(&self, seconds: f32) -> Vec3 {
        self.base_center + Vec3::Y * seconds.sin()
    }
}

/// The analytic showcase: four spheres, three point lights.
pub struct Showcase {
    pub scene: Scene,
    pub animated: AnimatedSphere,
}

impl Showcase {
    /// Move the animated sphere to where it should be at `seconds`.
    ///
    /// Call only between frames; the borrow checker keeps renders from
    /// overlapping with it.
    pub fn set_time(&mut self, seconds: f32) {
        let target = self.animated.center_at(seconds);
        let offset = target - self.animated.current_center;
        if let Some(sphere) = self.scene.world.get_mut(self.animated.index) {
            sphere.translate(offset);
            self.animated.current_center = target;
        }
    }
}

/// Ivory, mirror, rubber and mirror spheres lit by three point lights.
///
/// The ivory sphere is the animated one.
pub fn whitted_showcase() -> Result<Showcase, SceneError> {
    let ivory = Arc::new(Material::IVORY);
    let rubber = Arc::new(Material::RUBBER);
    let mirror = Arc::new(Material::MIRROR);

    let ivory_center = Vec3::new(-3.0, 0.0, -16.0);

    let mut scene = Scene::new();
    scene.add(Sphere::new(ivory_center, 2.0, ivory)?);
    scene.add(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, mirror.clone())?);
    scene.add(Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, rubber)?);
    scene.add(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, mirror)?);

    scene.add_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5)?);
    scene.add_light(Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8)?);
    scene.add_light(Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7)?);

    log::debug!(
        "Built showcase scene: {} spheres, {} lights",
        scene.len(),
        scene.lights.len()
    );

    Ok(Showcase {
        scene,
        animated: AnimatedSphere::new(0, ivory_center),
    })
}

/// A small sphere resting on a huge ground sphere, for the path tracer.
pub fn diffuse_pair() -> Result<Scene, SceneError> {
    let gray = Arc::new(Material::default());

    let mut scene = Scene::new();
    scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray.clone())?);
    scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, gray)?);
    Ok(scene)
}

/// Glass variant of the showcase, with a refractive sphere in front.
pub fn glass_showcase() -> Result<Showcase, SceneError> {
    let mut showcase = whitted_showcase()?;
    let glass = Arc::new(Material::GLASS);
    showcase
        .scene
        .add(Sphere::new(Vec3::new(2.0, -2.0, -10.0), 1.5, glass)?);
    Ok(showcase)
}
