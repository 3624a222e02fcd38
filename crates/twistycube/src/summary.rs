use serde::Serialize;
use twistycube_core::{Cube, Cubie, CubieId, EPSILON};

/// State of the cube as printed by the CLI.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct CubeSummary {
    pub size: u32,
    pub cubie_count: usize,
    /// Move log in notation, oldest first.
    pub log: String,
    pub solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cubies: Option<Vec<CubieSummary>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct CubieSummary {
    pub id: u32,
    pub template: String,
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    pub orientation: [f32; 4],
    pub home: [f32; 3],
}

impl CubeSummary {
    pub fn new(cube: &Cube, include_cubies: bool) -> Self {
        Self {
            size: cube.generated_size(),
            cubie_count: cube.cubie_count(),
            log: cube.log().to_string(),
            solved: cube.is_solved(EPSILON),
            cubies: include_cubies.then(|| {
                cube.cubies()
                    .map(|(id, cubie)| CubieSummary::new(id, cubie))
                    .collect()
            }),
        }
    }
}

impl CubieSummary {
    fn new(id: CubieId, cubie: &Cubie) -> Self {
        let p = cubie.position;
        let q = cubie.orientation;
        let h = cubie.home();
        Self {
            id: id.0,
            template: cubie.template.clone(),
            position: [p.x, p.y, p.z],
            orientation: [q.v.x, q.v.y, q.v.z, q.s],
            home: [h.x, h.y, h.z],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary_json() {
        let mut cube = Cube::new();
        cube.generate(2, "Cubie");

        let summary = CubeSummary::new(&cube, false);
        assert_eq!(8, summary.cubie_count);
        assert!(summary.solved);
        assert_eq!(
            r#"{"size":2,"cubie_count":8,"log":"","solved":true}"#,
            serde_json::to_string(&summary).unwrap(),
        );

        let summary = CubeSummary::new(&cube, true);
        let cubies = summary.cubies.unwrap();
        assert_eq!(8, cubies.len());
        assert_eq!(0, cubies[0].id);
        assert_eq!([-0.25, -0.25, -0.25], cubies[0].position);
        assert_eq!([0.0, 0.0, 0.0, 1.0], cubies[0].orientation);
        assert_eq!(cubies[0].position, cubies[0].home);
    }
}
