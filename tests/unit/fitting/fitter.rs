//! Tests for crop-and-resize into cells and the detector fallback

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, Rgb, RgbImage};
    use photocollage::faces::detector::{DetectionError, FaceDetector};
    use photocollage::faces::region::FaceBox;
    use photocollage::fitting::crop::CropRect;
    use photocollage::fitting::fitter::{CellFitter, fit};

    /// Returns scripted boxes and counts how often it is asked
    struct ScriptedDetector {
        result: Result<Vec<FaceBox>, DetectionError>,
        calls: usize,
    }

    impl FaceDetector for ScriptedDetector {
        fn detect(&mut self, _image: &GrayImage) -> Result<Vec<FaceBox>, DetectionError> {
            self.calls += 1;
            self.result.clone()
        }
    }

    // Left half red, right half blue
    fn split_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        }))
    }

    // Tests output always has the exact cell size
    // Verified by resizing with preserved aspect instead of exact dimensions
    #[test]
    fn test_fit_produces_cell_size() {
        let image = split_image(400, 300);
        for (w, h) in [(100, 100), (37, 91), (640, 120), (1, 1)] {
            let fitted = fit(&image, w, h, &[]).expect("fit should succeed");
            assert_eq!(fitted.image.dimensions(), (w, h));
        }
    }

    // Tests the crop follows faces and the resized pixels come from the crop
    // Verified by ignoring the face list in fit
    #[test]
    fn test_fit_crops_toward_face() {
        let image = split_image(400, 100);
        let face = FaceBox::new(320, 30, 40, 40);

        let fitted = fit(&image, 50, 50, &[face]).expect("fit should succeed");
        assert_eq!(
            fitted.crop,
            CropRect {
                x: 260,
                y: 0,
                width: 100,
                height: 100
            }
        );
        let center = fitted.image.get_pixel(25, 25);
        assert!(center.0[2] > 200 && center.0[0] < 50, "crop should be from the blue half");
    }

    // Tests zero cell dimensions are rejected
    // Verified by removing the dimension check
    #[test]
    fn test_fit_rejects_empty_cell() {
        let image = split_image(10, 10);
        assert!(fit(&image, 0, 10, &[]).is_err());
        assert!(fit(&image, 10, 0, &[]).is_err());
    }

    // Tests detection is skipped when no crop is needed
    // Verified by always running detection
    #[test]
    fn test_detection_skipped_for_matching_aspect() {
        let mut detector = ScriptedDetector {
            result: Ok(vec![FaceBox::new(0, 0, 10, 10)]),
            calls: 0,
        };
        let image = split_image(200, 100);
        {
            let mut fitter = CellFitter::new(&mut detector);
            let fitted = fitter.fit(&image, 100, 50).expect("fit should succeed");
            assert_eq!(fitted.crop, CropRect::full(200, 100));
        }
        assert_eq!(detector.calls, 0);
    }

    // Tests detected faces steer the crop through the fitter
    // Verified by discarding detector output
    #[test]
    fn test_fitter_uses_detected_faces() {
        let mut detector = ScriptedDetector {
            result: Ok(vec![FaceBox::new(0, 10, 30, 30)]),
            calls: 0,
        };
        let image = split_image(400, 100);
        let crop = {
            let mut fitter = CellFitter::new(&mut detector);
            fitter.fit(&image, 100, 100).expect("fit should succeed").crop
        };
        assert_eq!(crop.x, 0);
        assert_eq!(detector.calls, 1);
    }

    // Tests a failing detector falls back to the centered crop
    // Verified by propagating the detection error
    #[test]
    fn test_detection_failure_falls_back_to_center() {
        let mut detector = ScriptedDetector {
            result: Err(DetectionError::Backend {
                reason: "model exploded".to_string(),
            }),
            calls: 0,
        };
        let image = split_image(400, 100);
        let crop = {
            let mut fitter = CellFitter::new(&mut detector);
            fitter.fit(&image, 100, 100).expect("fit should succeed").crop
        };
        assert_eq!(crop.x, 150);
        assert_eq!(detector.calls, 1);
    }

    // Tests faces_for returns nothing without a needed crop
    // Verified by returning detector output unconditionally
    #[test]
    fn test_faces_for() {
        let mut detector = ScriptedDetector {
            result: Ok(vec![FaceBox::new(5, 5, 10, 10)]),
            calls: 0,
        };
        let mut fitter = CellFitter::new(&mut detector);
        let image = split_image(100, 100);
        assert!(fitter.faces_for(&image, 50, 50).is_empty());
        assert_eq!(fitter.faces_for(&image, 50, 25).len(), 1);
    }
}
