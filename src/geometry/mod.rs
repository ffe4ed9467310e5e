use num_traits::Float;
use serde::{Deserialize, Serialize};


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    squared_euclidean(x1, y1, x2, y2).sqrt()
}

/// Squared Euclidean distance
pub fn squared_euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}


/// 2D Point
/// Loaded networks store latitude in `x` and longitude in `y`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight line distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(squared_euclidean(1.0f32, 1.0, 4.0, 5.0), 25.0);
        assert_eq!(Point::new(1.0, 1.0).distance(&Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_point_serializes_as_pair() {
        let point: Point = serde_json::from_str("[19.3, -99.15]").unwrap();
        assert_eq!(point, Point::new(19.3, -99.15));
        assert_eq!(serde_json::to_string(&point).unwrap(), "[19.3,-99.15]");
    }
}
