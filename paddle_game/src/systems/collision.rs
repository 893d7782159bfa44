/// Axis-aligned box given by its center and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: [f32; 2],
    // half of the width and height
    pub extent: [f32; 2],
}

impl Aabb {
    pub fn new(center: [f32; 2], width: f32, height: f32) -> Self {
        Self {
            center,
            extent: [width * 0.5, height * 0.5],
        }
    }

    /// Square box around a circle; the ball collides as a box.
    pub fn around_circle(center: [f32; 2], radius: f32) -> Self {
        Self {
            center,
            extent: [radius, radius],
        }
    }

    /// Touching edges count as overlap.
    pub fn overlaps(&self, another: &Self) -> bool {
        (0..2).all(|axis| {
            self.center[axis] + self.extent[axis] >= another.center[axis] - another.extent[axis]
                && self.center[axis] - self.extent[axis]
                    <= another.center[axis] + another.extent[axis]
        })
    }
}

pub fn ball_hits_paddle(
    ball: [f32; 2],
    paddle: [f32; 2],
    paddle_width: f32,
    paddle_height: f32,
    ball_radius: f32,
) -> bool {
    Aabb::around_circle(ball, ball_radius).overlaps(&Aabb::new(paddle, paddle_width, paddle_height))
}
