use crate::pattern::PatternParams;

/// File name encoding every pattern parameter:
/// `{output}_{da}_{db}_{alpha}_{beta}_{steps}_{spatial}.{ext}`.
///
/// Floats use their shortest round-trip form and always keep a decimal
/// point (`1.0`, `-0.005`); the spatial slot is empty when unset.
pub fn artifact_name(output: &str, params: &PatternParams, ext: &str) -> String {
    format!(
        "{}_{:?}_{:?}_{:?}_{:?}_{}_{}.{}",
        output,
        params.da,
        params.db,
        params.alpha,
        params.beta,
        params.steps,
        if params.spatial { "spatial" } else { "" },
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_name() {
        let name = artifact_name("image", &PatternParams::default(), "png");
        assert_eq!(name, "image_1.0_100.0_-0.005_10.0_150_.png");
    }

    #[test]
    fn spatial_suffix() {
        let p = PatternParams { da: 2.5, spatial: true, steps: 7, ..Default::default() };
        assert_eq!(artifact_name("out", &p, "gif"), "out_2.5_100.0_-0.005_10.0_7_spatial.gif");
    }
}
