#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use crate::image_pipeline::common::error::GainError;
    use crate::image_pipeline::pnm::{
        self, ChannelSource, ImageReader, ImageType, ImageWriter, PnmReader, PnmWriter, RasterImage,
    };

    fn gray(width: usize, height: usize, data: Vec<u8>) -> RasterImage {
        RasterImage::from_data(width, height, ImageType::Grayscale, 255, data).unwrap()
    }

    fn encode_to_vec(image: &RasterImage) -> Vec<u8> {
        let mut output = Cursor::new(Vec::new());
        PnmWriter.write_image(image, &mut output).unwrap();
        output.into_inner()
    }

    #[test]
    fn test_writer_header_layout() {
        let bytes = encode_to_vec(&gray(2, 2, vec![1, 2, 3, 4]));
        assert_eq!(&bytes[..11], b"P5 2 2 255\n");
        assert_eq!(&bytes[11..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_grayscale_round_trip() {
        let image = gray(3, 2, vec![0, 17, 34, 128, 200, 255]);
        let decoded = PnmReader::default().read_image(&encode_to_vec(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_color_round_trip() {
        let data: Vec<u8> = (0..2 * 2 * 3).map(|v| (v * 20) as u8).collect();
        let image = RasterImage::from_data(2, 2, ImageType::Color, 255, data).unwrap();
        let decoded = PnmReader::default().read_image(&encode_to_vec(&image)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let mut bytes = b"P5\n# made by hand\n\n2 1\n# depth\n255\n".to_vec();
        bytes.extend_from_slice(&[9, 10]);
        let image = PnmReader::default().read_image(&bytes).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.data(), &[9, 10]);
    }

    #[test]
    fn test_invalid_marker() {
        let result = PnmReader::default().read_image(b"P3 1 1 255\n\x00");
        assert!(matches!(result, Err(GainError::FormatError(_))));
    }

    #[test]
    fn test_non_8bit_max_sample_rejected() {
        let mut bytes = b"P5 1 1 65535\n".to_vec();
        bytes.extend_from_slice(&[0, 0]);
        let result = PnmReader::default().read_image(&bytes);
        assert!(matches!(result, Err(GainError::FormatError(_))));
    }

    #[test]
    fn test_unparsable_size() {
        let result = PnmReader::default().read_image(b"P5 x 1 255\n\x00");
        assert!(matches!(result, Err(GainError::FormatError(_))));
    }

    #[test]
    fn test_short_payload() {
        let result = PnmReader::new(ChannelSource::Marker).read_image(b"P6 2 2 255\n\x00\x01\x02");
        assert!(matches!(result, Err(GainError::FormatError(_))));
    }

    #[test]
    fn test_payload_size_overrides_marker() {
        let mut bytes = b"P5 1 2 255\n".to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        let legacy = PnmReader::new(ChannelSource::PayloadSize).read_image(&bytes).unwrap();
        assert_eq!(legacy.image_type(), ImageType::Color);

        let strict = PnmReader::new(ChannelSource::Marker).read_image(&bytes).unwrap();
        assert_eq!(strict.image_type(), ImageType::Grayscale);
        assert_eq!(strict.data(), &[1, 2]);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.ppm");
        let image = gray(4, 4, (0..16).map(|v| v * 16).collect());

        pnm::encode(&path, &image).unwrap();
        let decoded = pnm::decode(&path, ChannelSource::PayloadSize).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = pnm::decode(dir.path().join("missing.ppm"), ChannelSource::default());
        assert!(matches!(result, Err(GainError::InputReadError(_))));
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let image = gray(1, 1, vec![7]);
        let result = pnm::encode(dir.path().join("no_such_dir").join("out.ppm"), &image);
        assert!(matches!(result, Err(GainError::OutputWriteError(_))));
    }

    #[test]
    fn test_file_helpers_accept_trait_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("color.ppm");
        let data = vec![10, 20, 30, 40, 50, 60];
        let image = RasterImage::from_data(2, 1, ImageType::Color, 255, data).unwrap();

        let writer: &dyn ImageWriter = &PnmWriter;
        pnm::write_with(writer, &path, &image).unwrap();

        let reader: &dyn ImageReader = &PnmReader::new(ChannelSource::Marker);
        assert_eq!(pnm::read_with(reader, &path).unwrap(), image);

        let missing = pnm::read_with(reader, &dir.path().join("missing.ppm"));
        assert!(matches!(missing, Err(GainError::InputReadError(_))));
    }
}
