//! Tests for command-line parsing and the collage build pipeline

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use image::{Rgb, RgbImage};
    use photocollage::CollageError;
    use photocollage::io::cli::{Cli, CollageBuilder, confirm_overwrite};
    use photocollage::io::configuration::{
        DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_OUTPUT, DEFAULT_PADDING,
    };
    use photocollage::layout::policy::RowPolicy;
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_images(dir: &Path, count: usize, width: u32, height: u32) {
        for index in 0..count {
            RgbImage::from_pixel(width, height, Rgb([(index * 20) as u8, 100, 150]))
                .save(dir.join(format!("img_{index:02}.png")))
                .expect("fixture should save");
        }
    }

    fn cli_for(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "photocollage".to_string(),
            input.to_string_lossy().to_string(),
            "--output".to_string(),
            output.to_string_lossy().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the required folder argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photos"]);

        assert_eq!(cli.input_folder, PathBuf::from("photos"));
        assert_eq!(cli.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(cli.height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.padding, DEFAULT_PADDING);
        assert_eq!(cli.background, Rgb([255, 255, 255]));
        assert_eq!(cli.num_rows, None);
        assert_eq!(cli.row_policy, RowPolicy::Balanced);
        assert!(!cli.shuffle && !cli.overwrite && !cli.quiet);
        assert!(cli.should_show_progress());
    }

    // Tests every short flag maps to its option
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "photos", "-w", "800", "-i", "600", "-o", "out.png", "-n", "3", "-s", "-p",
            "5", "-c", "#000", "-Y", "-q", "-vv",
        ]);

        assert_eq!((cli.width, cli.height), (800, 600));
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.num_rows, Some(3));
        assert!(cli.shuffle && cli.overwrite && cli.quiet);
        assert_eq!(cli.padding, 5);
        assert_eq!(cli.background, Rgb([0, 0, 0]));
        assert_eq!(cli.verbose, 2);

        let canvas = cli.canvas();
        assert_eq!((canvas.width, canvas.height, canvas.rows, canvas.padding), (800, 600, Some(3), 5));
    }

    // Tests the face model help states that detection is off without a model
    // Verified by shortening the help to the model description alone
    #[test]
    fn test_face_model_help_mentions_default() {
        let command = Cli::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "face_model")
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .expect("face model option should have help");

        assert!(help.contains("detection is off"), "help was {help:?}");
        assert!(help.contains("centered"), "help was {help:?}");
        assert_eq!(Cli::parse_from(["program", "photos"]).face_model, None);
    }

    // Tests invalid numeric options are usage errors
    // Verified by removing the range restrictions
    #[test]
    fn test_cli_rejects_invalid_numbers() {
        assert!(Cli::try_parse_from(["program", "photos", "-w", "0"]).is_err());
        assert!(Cli::try_parse_from(["program", "photos", "-i", "70000"]).is_err());
        assert!(Cli::try_parse_from(["program", "photos", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["program", "photos", "-c", "#12"]).is_err());
        assert!(Cli::try_parse_from(["program", "photos", "--seed", "4"]).is_err());
        assert!(Cli::try_parse_from(["program", "photos", "--row-policy", "search"]).is_ok());
    }

    // Tests the overwrite prompt accepts only yes answers
    // Verified by treating any input as confirmation
    #[test]
    fn test_confirm_overwrite() {
        let path = Path::new("collage.jpg");
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
            let mut prompt = Vec::new();
            let confirmed = confirm_overwrite(path, &mut Cursor::new(answer), &mut prompt)
                .expect("prompt should succeed");
            assert_eq!(confirmed, expected, "answer {answer:?}");
            assert!(String::from_utf8_lossy(&prompt).contains("Overwrite? (y/n)"));
        }
    }

    // Tests an existing output aborts before any work when not confirmed
    // Verified by checking for the output after processing
    #[test]
    fn test_existing_output_aborts() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        write_images(&input, 2, 10, 10);
        let output = dir.path().join("collage.png");
        fs::write(&output, b"keep me").expect("write");

        let mut builder =
            CollageBuilder::new(cli_for(&input, &output, &[])).with_confirmation(|_| false);
        let result = builder.process();

        assert!(matches!(result, Err(CollageError::OutputExists { .. })));
        assert_eq!(fs::read(&output).expect("read"), b"keep me");
    }

    // Tests a confirmed or forced overwrite replaces the output
    // Verified by ignoring the confirmation answer
    #[test]
    fn test_confirmed_overwrite_replaces_output() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        write_images(&input, 2, 10, 10);
        let output = dir.path().join("collage.png");

        fs::write(&output, b"old").expect("write");
        let mut confirmed =
            CollageBuilder::new(cli_for(&input, &output, &["-w", "40", "-i", "20"])).with_confirmation(|_| true);
        assert!(confirmed.process().is_ok());
        assert_ne!(fs::read(&output).expect("read"), b"old");

        fs::write(&output, b"old").expect("write");
        let mut forced = CollageBuilder::new(cli_for(&input, &output, &["-w", "40", "-i", "20", "-Y"]))
            .with_confirmation(|_| unreachable!("--overwrite must not prompt"));
        assert!(forced.process().is_ok());
        assert_ne!(fs::read(&output).expect("read"), b"old");
    }

    // Tests the summary and the written canvas for a simple grid
    // Verified by pasting every cell at the origin
    #[test]
    fn test_process_builds_collage() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        write_images(&input, 6, 100, 100);
        let output = dir.path().join("collage.png");

        let mut builder = CollageBuilder::new(cli_for(&input, &output, &["-w", "192", "-i", "108"]));
        let summary = builder.process().expect("collage should build");

        assert_eq!(summary.placed, 6);
        assert_eq!(summary.rows, 2);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.output, output);

        let collage = image::open(&output).expect("reload").to_rgb8();
        assert_eq!(collage.dimensions(), (192, 108));
    }

    // Tests padding leaves the background visible around cells
    // Verified by ignoring padding during composition
    #[test]
    fn test_process_with_padding_and_background() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        write_images(&input, 4, 50, 50);
        let output = dir.path().join("collage.png");

        let mut builder = CollageBuilder::new(cli_for(
            &input,
            &output,
            &["-w", "110", "-i", "110", "-p", "10", "-c", "#00FF00", "-n", "2"],
        ));
        let summary = builder.process().expect("collage should build");
        assert_eq!(summary.placed, 4);

        let collage = image::open(&output).expect("reload").to_rgb8();
        assert_eq!(*collage.get_pixel(0, 0), Rgb([0, 255, 0]));
        assert_eq!(*collage.get_pixel(55, 55), Rgb([0, 255, 0]));
        assert_ne!(*collage.get_pixel(30, 30), Rgb([0, 255, 0]));
    }

    // Tests folders without usable images are usage errors
    // Verified by writing an empty canvas instead
    #[test]
    fn test_process_empty_folder() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("notes.txt"), "no images here").expect("write");
        let output = dir.path().join("collage.png");

        let mut builder = CollageBuilder::new(cli_for(dir.path(), &output, &[]));
        assert!(matches!(builder.process(), Err(CollageError::NoImages { .. })));
        assert!(!output.exists());
    }

    // Tests a missing input folder is a usage error
    // Verified by treating the path as an empty folder
    #[test]
    fn test_process_missing_folder() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("collage.png");
        let mut builder = CollageBuilder::new(cli_for(&dir.path().join("absent"), &output, &[]));
        assert!(matches!(builder.process(), Err(CollageError::NotADirectory { .. })));
    }

    // Tests padding without room for one cell is rejected before loading
    // Verified by leaving the check to the planner after images are decoded
    #[test]
    fn test_process_rejects_oversized_padding() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        fs::write(input.join("a.jpg"), b"not a jpeg").expect("write");
        let output = dir.path().join("collage.png");

        let mut builder = CollageBuilder::new(cli_for(&input, &output, &["-p", "5000"]));
        match builder.process() {
            Err(CollageError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "canvas"),
            other => unreachable!("Expected InvalidParameter, got {other:?}"),
        }
        assert!(!output.exists());

        let mut wide_only = CollageBuilder::new(cli_for(
            &input,
            &output,
            &["-w", "4000", "-i", "100", "-p", "60"],
        ));
        assert!(matches!(
            wide_only.process(),
            Err(CollageError::InvalidParameter { .. })
        ));
    }

    // Tests a bad face model aborts before loading images
    // Verified by silently falling back to no detector
    #[test]
    fn test_process_bad_face_model() {
        let dir = TempDir::new().expect("tempdir");
        write_images(dir.path(), 2, 10, 10);
        let output = dir.path().join("out").join("collage.png");
        let model = dir.path().join("missing_model.bin");

        let mut builder = CollageBuilder::new(cli_for(
            dir.path(),
            &output,
            &["--face-model", &model.to_string_lossy()],
        ));
        assert!(matches!(builder.process(), Err(CollageError::FaceModel { .. })));
        assert!(!output.exists());
    }

    // Tests seeded shuffles are reproducible
    // Verified by ignoring the seed
    #[test]
    fn test_seeded_shuffle_reproducible() {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("photos");
        fs::create_dir(&input).expect("mkdir");
        write_images(&input, 8, 20, 20);

        let render = |name: &str| {
            let output = dir.path().join(name);
            let mut builder = CollageBuilder::new(cli_for(
                &input,
                &output,
                &["-w", "80", "-i", "40", "-s", "--seed", "7"],
            ));
            builder.process().expect("collage should build");
            image::open(&output).expect("reload").to_rgb8()
        };

        assert_eq!(render("first.png"), render("second.png"));
    }
}
