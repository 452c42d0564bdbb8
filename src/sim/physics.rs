//! One physics step over the scene's bodies
//!
//! Moves every body, resolves wall bounces (restitution 1, no friction) and
//! returns the contacts that began this step. Gameplay reactions to those
//! contacts belong to the `ContactHandler`, not to this module.

use super::body::{Body, Contact};
use super::collision::{
    circle_band_collision, circle_box_collision, circles_overlap, reflect_velocity,
    side_wall_collision,
};
use super::halo::PowerUpKind;
use super::scene::Scene;

/// Integrate motion and collect the contacts found this step
pub fn step(scene: &mut Scene, dt: f32) -> Vec<Contact> {
    let width = scene.tuning.field_width;
    let mut contacts = Vec::new();

    for ball in &mut scene.balls {
        ball.pos += ball.vel * dt;
        if let Some((side, hit)) = side_wall_collision(ball.pos, ball.radius, width) {
            if ball.vel.dot(hit.normal) < 0.0 {
                ball.vel = reflect_velocity(ball.vel, hit.normal);
            }
            ball.pos += hit.normal * hit.penetration;
            contacts.push(Contact::new(Body::Ball(ball.id), Body::Edge(side)));
        }
    }

    for halo in &mut scene.halos {
        halo.pos += halo.vel * dt;
        if let Some((side, hit)) = side_wall_collision(halo.pos, halo.radius, width) {
            if halo.vel.dot(hit.normal) < 0.0 {
                halo.vel = reflect_velocity(halo.vel, hit.normal);
            }
            halo.pos += hit.normal * hit.penetration;
            contacts.push(Contact::new(Body::Halo(halo.id), Body::Edge(side)));
        }
    }

    // Power-ups ignore the walls and drift straight across
    for power_up in &mut scene.power_ups {
        power_up.pos += power_up.vel * dt;
    }

    for halo in &scene.halos {
        for ball in &scene.balls {
            if circles_overlap(halo.pos, halo.radius, ball.pos, ball.radius) {
                contacts.push(Contact::new(Body::Halo(halo.id), Body::Ball(ball.id)));
            }
        }
        for shield in &scene.shields {
            if circle_box_collision(halo.pos, halo.radius, shield.pos, shield.half_size).hit {
                contacts.push(Contact::new(Body::Halo(halo.id), Body::Shield(shield.id)));
            }
        }
        if let Some(bar) = &scene.life_bar
            && circle_band_collision(halo.pos, halo.radius, bar.y, bar.half_height)
        {
            contacts.push(Contact::new(Body::Halo(halo.id), Body::LifeBar));
        }
    }

    for ball in &scene.balls {
        for power_up in &scene.power_ups {
            if circles_overlap(ball.pos, ball.radius, power_up.pos, power_up.radius) {
                let body = match power_up.kind {
                    PowerUpKind::Shield => Body::ShieldPowerUp(power_up.id),
                    PowerUpKind::MultiShot => Body::MultiShotPowerUp(power_up.id),
                };
                contacts.push(Contact::new(Body::Ball(ball.id), body));
            }
        }
    }

    contacts
}
