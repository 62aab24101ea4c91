extern crate echovision_detect;

use echovision_detect::common::{EvBox, ProcessorConfig, UNKNOWN_LABEL};
use echovision_detect::data::RawDetections;
use echovision_detect::detection_runners::InferenceProcess;
use echovision_detect::{post_process, DetectionPostProcessor};
use ndarray::{Array1, Array2, Array3};

use fixtures::{assert_close, assert_rect, five_labels, IMG_HEIGHT, IMG_WIDTH};

fn processor() -> DetectionPostProcessor {
    DetectionPostProcessor::new(five_labels(), ProcessorConfig::default())
}

#[test]
fn single_candidate_is_kept() {
    let raw = RawDetections::from_arrays(vec![[0.1, 0.2, 0.5, 0.6]], vec![0.], vec![0.9]);

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].label, "person");
    assert_eq!(result[0].class_id, Some(0));
    assert_close(result[0].confidence, 0.9);
}

#[test]
fn identical_boxes_keep_highest_score() {
    let raw = RawDetections::from_arrays(
        vec![[0.1, 0.1, 0.5, 0.5], [0.1, 0.1, 0.5, 0.5]],
        vec![2., 3.],
        vec![0.6, 0.9],
    );

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result.len(), 1);
    assert_close(result[0].confidence, 0.9);
    assert_eq!(result[0].label, "dog");
}

#[test]
fn disjoint_boxes_are_both_kept() {
    let raw = RawDetections::from_arrays(
        vec![[0.0, 0.0, 0.3, 0.3], [0.6, 0.6, 0.9, 0.9]],
        vec![1., 2.],
        vec![0.8, 0.8],
    );

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result.len(), 2);
    // equal scores keep input order
    assert_eq!(result[0].label, "bicycle");
    assert_eq!(result[1].label, "car");
}

#[test]
fn out_of_range_class_is_unknown() {
    let raw = RawDetections::from_arrays(vec![[0.1, 0.1, 0.4, 0.4]], vec![99.], vec![0.7]);

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].label, UNKNOWN_LABEL);
    assert_eq!(result[0].class_id, None);
    assert!(result[0].is_unknown());
}

#[test]
fn fractional_class_index_is_truncated() {
    let raw = RawDetections::from_arrays(vec![[0.1, 0.1, 0.4, 0.4]], vec![4.9], vec![0.7]);

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result[0].label, "chair");
    assert_eq!(result[0].class_id, Some(4));
}

#[test]
fn output_is_ranked_by_score() {
    let raw = RawDetections::from_arrays(
        vec![
            [0.0, 0.0, 0.2, 0.2],
            [0.3, 0.3, 0.5, 0.5],
            [0.6, 0.6, 0.8, 0.8],
            [0.8, 0.0, 1.0, 0.2],
        ],
        vec![0., 1., 2., 3.],
        vec![0.7, 0.95, 0.7, 0.55],
    );

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);
    let labels: Vec<&str> = result.iter().map(|d| d.label.as_str()).collect();

    assert_eq!(labels, vec!["bicycle", "person", "car", "dog"]);
}

#[test]
fn partial_overlap_below_threshold_survives() {
    // IoU = 0.25 / 1.75 ~ 0.14
    let raw = RawDetections::from_arrays(
        vec![[0.0, 0.0, 0.5, 0.5], [0.25, 0.25, 0.75, 0.75]],
        vec![0., 0.],
        vec![0.9, 0.8],
    );

    assert_eq!(processor().process(&raw, IMG_WIDTH, IMG_HEIGHT).len(), 2);

    let strict = DetectionPostProcessor::new(five_labels(), ProcessorConfig::new().with_nms_threshold(0.1));
    assert_eq!(strict.process(&raw, IMG_WIDTH, IMG_HEIGHT).len(), 1);
}

#[test]
fn boxes_are_scaled_to_pixels() {
    let raw = RawDetections::from_arrays(vec![[0.25, 0.1, 0.75, 0.6]], vec![0.], vec![0.9]);

    let result = processor().process(&raw, 200, 100);

    assert_rect(&result[0].bbox, 20., 25., 120., 75.);
    assert_close(result[0].bbox.area(), 5000.);
    assert_eq!(result[0].bbox.center(), (70., 50.));
    assert_eq!(result[0].bbox.as_xy_wh_i32(), (20, 25, 100, 50));
}

#[test]
fn boxes_are_clamped_to_image() {
    let raw = RawDetections::from_arrays(vec![[-0.1, -0.2, 1.3, 1.1]], vec![0.], vec![0.9]);

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_rect(&result[0].bbox, 0., 0., IMG_WIDTH as f32, IMG_HEIGHT as f32);
}

#[test]
fn score_above_one_is_clamped() {
    let raw = RawDetections::from_arrays(vec![[0.1, 0.1, 0.4, 0.4]], vec![0.], vec![1.7]);

    let result = processor().process(&raw, IMG_WIDTH, IMG_HEIGHT);

    assert_eq!(result[0].confidence, 1.);
}

#[test]
fn negative_score_is_clamped_when_threshold_admits_it() {
    let labels = five_labels();

    let direct = post_process(&[[0.1, 0.1, 0.5, 0.5]], &[0.], &[-0.3], 1, &labels, -1.0, 0.5, 100, 100);
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].confidence, 0.);

    let loose = DetectionPostProcessor::new(five_labels(), ProcessorConfig::new().with_confidence_threshold(-1.0));
    let raw = RawDetections::from_arrays(vec![[0.1, 0.1, 0.5, 0.5]], vec![0.], vec![-0.3]);
    let result = loose.process(&raw, 100, 100);
    assert!(result.iter().all(|d| (0.0..=1.0).contains(&d.confidence)));
    assert_eq!(result[0].percent(), 0);
}

#[test]
fn only_counted_slots_are_read() {
    let raw = RawDetections::new(
        vec![[0.0, 0.0, 0.2, 0.2], [0.5, 0.5, 0.7, 0.7], [0.8, 0.8, 0.9, 0.9]],
        vec![0., 1., 2.],
        vec![0.9, 0.9, 0.9],
        2,
    );

    assert_eq!(raw.valid_len(), 2);
    assert_eq!(processor().process(&raw, IMG_WIDTH, IMG_HEIGHT).len(), 2);
}

#[test]
fn short_arrays_limit_the_count() {
    let raw = RawDetections::new(vec![[0.0, 0.0, 0.2, 0.2], [0.5, 0.5, 0.7, 0.7]], vec![0.], vec![0.9, 0.9], 10);

    assert_eq!(raw.valid_len(), 1);
    assert_eq!(processor().process(&raw, IMG_WIDTH, IMG_HEIGHT).len(), 1);
}

#[test]
fn max_detections_caps_the_slots() {
    let boxes = (0..5).map(|i| {
        let y = i as f32 * 0.2;
        [y, 0.0, y + 0.1, 0.1]
    }).collect();
    let raw = RawDetections::from_arrays(boxes, vec![0.; 5], vec![0.9; 5]);
    let capped = DetectionPostProcessor::new(five_labels(), ProcessorConfig::new().with_max_detections(3));

    assert_eq!(capped.process(&raw, IMG_WIDTH, IMG_HEIGHT).len(), 3);
}

#[test]
fn free_function_matches_processor() {
    let boxes = [[0.1, 0.1, 0.5, 0.5], [0.12, 0.1, 0.5, 0.52], [0.6, 0.6, 0.9, 0.9]];
    let classes = [0., 1., 2.];
    let scores = [0.9, 0.85, 0.6];
    let labels = five_labels();

    let direct = post_process(&boxes, &classes, &scores, 3, &labels, 0.5, 0.5, IMG_WIDTH, IMG_HEIGHT);
    let raw = RawDetections::from_arrays(boxes.to_vec(), classes.to_vec(), scores.to_vec());

    assert_eq!(direct, processor().process(&raw, IMG_WIDTH, IMG_HEIGHT));
    assert_eq!(direct.len(), 2);
}

#[test]
fn batch_preserves_frame_order() {
    let frames: Vec<(RawDetections, u32, u32)> = (0..8)
        .map(|i| {
            let raw = RawDetections::from_arrays(vec![[0.1, 0.1, 0.5, 0.5]], vec![(i % 5) as f32], vec![0.9]);
            (raw, 100 + i, 100)
        })
        .collect();

    let results = processor().process_batch(&frames);

    assert_eq!(results.len(), 8);
    for (i, ys) in results.iter().enumerate() {
        assert_eq!(ys.len(), 1);
        assert_eq!(ys[0].class_id, Some(i % 5));
        assert_close(ys[0].bbox.right, (100 + i) as f32 * 0.5);
    }
}

#[test]
fn tensors_split_per_image() {
    let locations = Array3::from_shape_vec(
        (2, 2, 4),
        vec![
            0.1, 0.1, 0.5, 0.5, 0.6, 0.6, 0.9, 0.9,
            0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0,
        ],
    ).unwrap();
    let classes = Array2::from_shape_vec((2, 2), vec![0., 3., 1., 0.]).unwrap();
    let scores = Array2::from_shape_vec((2, 2), vec![0.9, 0.8, 0.7, 0.0]).unwrap();
    let counts = Array1::from_vec(vec![2., 1.]);

    let ys = RawDetections::from_tensors(locations.view(), classes.view(), scores.view(), counts.view()).unwrap();

    assert_eq!(ys.len(), 2);
    assert_eq!(ys[0].valid_len(), 2);
    assert_eq!(ys[0].boxes[1], [0.6, 0.6, 0.9, 0.9]);
    assert_eq!(ys[1].valid_len(), 1);
    assert_eq!(ys[1].class_indices, vec![1., 0.]);

    let result = processor().process(&ys[0], IMG_WIDTH, IMG_HEIGHT);
    assert_eq!(result.len(), 2);
    assert_eq!(result[1].label, "dog");
}

#[test]
fn tensors_with_mismatched_shapes_are_rejected() {
    let locations = Array3::<f32>::zeros((1, 3, 4));
    let classes = Array2::<f32>::zeros((1, 2));
    let scores = Array2::<f32>::zeros((1, 3));
    let counts = Array1::from_vec(vec![3.]);

    assert!(RawDetections::from_tensors(locations.view(), classes.view(), scores.view(), counts.view()).is_err());
}

#[test]
fn negative_count_reads_nothing() {
    let locations = Array3::<f32>::zeros((1, 1, 4));
    let classes = Array2::<f32>::zeros((1, 1));
    let scores = Array2::from_elem((1, 1), 0.9f32);
    let counts = Array1::from_vec(vec![-1.]);

    let ys = RawDetections::from_tensors(locations.view(), classes.view(), scores.view(), counts.view()).unwrap();

    assert_eq!(ys[0].valid_len(), 0);
}

#[test]
fn iou_of_nested_boxes() {
    let outer = EvBox::new(0.0, 0.0, 1.0, 1.0);
    let inner = EvBox::new(0.0, 0.0, 0.5, 0.5);

    assert_close(outer.iou(&inner), 0.25);
    assert_close(inner.iou(&outer), 0.25);
    assert_close(outer.iou(&outer), 1.0);
}

struct FakeModel {
    output: RawDetections,
    fail: bool,
}

impl InferenceProcess for FakeModel {
    type Input = (u32, u32);

    fn infer(&mut self, _input: &Self::Input) -> anyhow::Result<RawDetections> {
        if self.fail {
            anyhow::bail!("interpreter not loaded");
        }
        Ok(self.output.clone())
    }

    fn dimensions(&self, input: &Self::Input) -> (u32, u32) {
        *input
    }
}

#[test]
fn inference_pipeline_runs_post_processing() {
    let mut model = FakeModel {
        output: RawDetections::from_arrays(vec![[0.0, 0.0, 0.5, 0.5]], vec![2.], vec![0.75]),
        fail: false,
    };

    let result = model.detect(&(300, 300), &processor(), true).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].label, "car");
    assert_rect(&result[0].bbox, 0., 0., 150., 150.);
}

#[test]
fn inference_failure_is_propagated() {
    let mut model = FakeModel {
        output: RawDetections::default(),
        fail: true,
    };

    assert!(model.detect(&(300, 300), &processor(), false).is_err());
}
