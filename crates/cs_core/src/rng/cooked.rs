//! State of Go's additive lagged Fibonacci generator after 7.8e12 steps
//! from seed 1. Seeding XORs it into the fresh state.

pub(super) const RNG_COOKED: [i64; 607] = [
    -4_181_792_142_133_755_926, -4_576_982_950_128_230_565, 1_395_769_623_340_756_751,
    5_333_664_234_075_297_259, -6_347_679_516_498_800_754, 9_033_628_115_061_424_579,
    7_143_218_595_135_194_537, 4_812_947_590_706_362_721, 7_937_252_194_349_799_378,
    5_307_299_880_338_848_416, 8_209_348_851_763_925_077, -7_107_630_437_535_961_764,
    4_593_015_457_530_856_296, 8_140_875_735_541_888_011, -5_903_942_795_589_686_782,
    -603_556_388_664_454_774, -7_496_297_993_371_156_308, 113_108_499_721_038_619,
    4_569_519_971_459_345_583, -4_160_538_177_779_461_077, -6_835_753_265_595_711_384,
    -6_507_240_692_498_089_696, 6_559_392_774_825_876_886, 7_650_093_201_692_370_310,
    7_684_323_884_043_752_161, -8_965_504_200_858_744_418, -2_629_915_517_445_760_644,
    271_327_514_973_697_897, -6_433_985_589_514_657_524, 1_065_192_797_246_149_621,
    3_344_507_881_999_356_393, -4_763_574_095_074_709_175, 7_465_081_662_728_599_889,
    1_014_950_805_555_097_187, -4_773_931_307_508_785_033, -5_742_262_670_416_273_165,
    2_418_672_789_110_888_383, 5_796_562_887_576_294_778, 4_484_266_064_449_540_171,
    3_738_982_361_971_787_048, -4_699_774_852_342_421_385, 10_530_508_058_128_498,
    -589_538_253_572_429_690, -6_598_062_107_225_984_180, 8_660_405_965_245_884_302,
    10_162_832_508_971_942, -2_682_657_355_892_958_417, 7_031_802_312_784_620_857,
    6_240_911_277_345_944_669, 831_864_355_460_801_054, -1_218_937_899_312_622_917,
    2_116_287_251_661_052_151, 2_202_309_800_992_166_967, 9_161_020_366_945_053_561,
    4_069_299_552_407_763_864, 4_936_383_537_992_622_449, 457_351_505_131_524_928,
    -8_881_176_990_926_596_454, -6_375_600_354_038_175_299, -7_155_351_920_868_399_290,
    4_368_649_989_588_021_065, 887_231_587_095_185_257, -3_659_780_529_968_199_312,
    -2_407_146_836_602_825_512, 5_616_972_787_034_086_048, -751_562_733_459_939_242,
    1_686_575_021_641_186_857, -5_177_887_698_780_513_806, -4_979_215_821_652_996_885,
    -1_375_154_703_071_198_421, 5_632_136_521_049_761_902, -8_390_088_894_796_940_536,
    -193_645_528_485_698_615, -5_979_788_902_190_688_516, -4_907_000_935_050_298_721,
    -285_522_056_888_777_828, -2_776_431_630_044_341_707, 1_679_342_092_332_374_735,
    6_050_638_460_742_422_078, -2_229_851_317_345_194_226, -1_582_494_184_340_482_199,
    5_881_353_426_285_907_985, 812_786_550_756_860_885, 4_541_845_584_483_343_330,
    -6_497_901_820_577_766_722, 4_980_675_660_146_853_729, -4_012_602_956_251_539_747,
    -329_088_717_864_244_987, -2_896_929_232_104_691_526, 1_495_812_843_684_243_920,
    -2_153_620_458_055_647_789, 7_370_257_291_860_230_865, -2_466_442_761_497_833_547,
    4_706_794_511_633_873_654, -1_398_851_569_026_877_145, 8_549_875_090_542_453_214,
    -9_189_721_207_376_179_652, -7_894_453_601_103_453_165, 7_297_902_601_803_624_459,
    1_011_190_183_918_857_495, -6_985_347_000_036_920_864, 5_147_159_997_473_910_359,
    -8_326_859_945_294_252_826, 2_659_470_849_286_379_941, 6_097_729_358_393_448_602,
    -7_491_646_050_550_022_124, -5_117_116_194_870_963_097, -896_216_826_133_240_300,
    -745_860_416_168_701_406, 5_803_876_044_675_762_232, -787_954_255_994_554_146,
    -3_234_519_180_203_704_564, -4_507_534_739_750_823_898, -1_657_200_065_590_290_694,
    505_808_562_678_895_611, -4_153_273_856_159_712_438, -8_381_261_370_078_904_295,
    572_156_825_025_677_802, 1_791_881_013_492_340_891, 3_393_267_094_866_038_768,
    -5_444_650_186_382_539_299, 2_352_769_483_186_201_278, -7_930_912_453_007_408_350,
    -325_464_993_179_687_389, -3_441_562_999_710_612_272, -6_489_413_242_825_283_295,
    5_092_019_688_680_754_699, -227_247_482_082_248_967, 4_234_737_173_186_232_084,
    5_027_558_287_275_472_836, 4_635_198_586_344_772_304, -536_033_143_587_636_457,
    5_907_508_150_730_407_386, -8_438_615_781_380_831_356, 972_392_927_514_829_904,
    -3_801_314_342_046_600_696, -4_064_951_393_885_491_917, -174_840_358_296_132_583,
    2_407_211_146_698_877_100, -1_640_089_820_333_676_239, 3_940_796_514_530_962_282,
    -5_882_197_405_809_569_433, 3_095_313_889_586_102_949, -1_818_050_141_166_537_098,
    5_832_080_132_947_175_283, 7_890_064_875_145_919_662, 8_184_139_210_799_583_195,
    -8_073_512_175_445_549_678, -7_758_774_793_014_564_506, -4_581_724_029_666_783_935,
    3_516_491_885_471_466_898, -8_267_083_515_063_118_116, 6_657_089_965_014_657_519,
    5_220_884_358_887_979_358, 1_796_677_326_474_620_641, 5_340_761_970_648_932_916,
    1_147_977_171_614_181_568, 5_066_037_465_548_252_321, 2_574_765_911_837_859_848,
    1_085_848_279_845_204_775, -5_873_264_506_986_385_449, 6_116_438_694_366_558_490,
    2_107_701_075_971_293_812, -7_420_077_970_933_506_541, 2_469_478_054_175_558_874,
    -1_855_128_755_834_809_824, -5_431_463_669_011_098_282, -9_038_325_065_738_319_171,
    -6_966_276_280_341_336_160, 7_217_693_971_077_460_129, -8_314_322_083_775_271_549,
    7_196_649_268_545_224_266, -3_585_711_691_453_906_209, -5_267_827_091_426_810_625,
    8_057_528_650_917_418_961, -5_084_103_596_553_648_165, -2_601_445_448_341_207_749,
    -7_850_010_900_052_094_367, 6_527_366_231_383_600_011, 3_507_654_575_162_700_890,
    9_202_058_512_774_729_859, 1_954_818_376_891_585_542, -2_582_991_129_724_600_103,
    8_299_563_319_178_235_687, -5_321_504_681_635_821_435, 7_046_310_742_295_574_065,
    -2_376_176_645_520_785_576, -7_650_733_936_335_907_755, 8_850_422_670_118_399_721,
    3_631_909_142_291_992_901, 5_158_881_091_950_831_288, -6_340_413_719_511_654_215,
    4_763_258_931_815_816_403, 6_280_052_734_341_785_344, -4_979_582_628_649_810_958,
    2_043_464_728_020_827_976, -2_678_071_570_832_690_343, 4_562_580_375_758_598_164,
    5_495_451_168_795_427_352, -7_485_059_175_264_624_713, 553_004_618_757_816_492,
    6_895_160_632_757_959_823, -989_748_114_590_090_637, 7_139_506_338_801_360_852,
    -672_480_814_466_784_139, 5_535_668_688_139_305_547, 2_430_933_853_350_256_242,
    -3_821_430_778_991_574_732, -1_063_731_997_747_047_009, -3_065_878_205_254_005_442,
    7_632_066_283_658_143_750, 6_308_328_381_617_103_346, 3_681_878_764_086_140_361,
    3_289_686_137_190_109_749, 6_587_997_200_611_086_848, 244_714_774_258_135_476,
    -5_143_583_659_437_639_708, 8_090_302_575_944_624_335, 2_945_117_363_431_356_361,
    -8_359_047_641_006_034_763, 3_009_039_260_312_620_700, -793_344_576_772_241_777,
    401_084_700_045_993_341, -1_968_749_590_416_080_887, 4_707_864_159_563_588_614,
    -3_583_123_505_891_281_857, -3_240_864_324_164_777_915, -5_908_273_794_572_565_703,
    -3_719_524_458_082_857_382, -5_281_400_669_679_581_926, 8_118_566_580_304_798_074,
    3_839_261_274_019_871_296, 7_062_410_411_742_090_847, -8_481_991_033_874_568_140,
    6_027_994_129_690_250_817, -6_725_542_042_704_711_878, -2_971_981_702_428_546_974,
    -7_854_441_788_951_256_975, 8_809_096_399_316_380_241, 6_492_004_350_391_900_708,
    2_462_145_737_463_489_636, -8_818_543_617_934_476_634, -5_070_345_602_623_085_213,
    -8_961_586_321_599_299_868, -3_758_656_652_254_704_451, -8_630_661_632_476_012_791,
    6_764_129_236_657_751_224, -709_716_318_315_418_359, -3_403_028_373_052_861_600,
    -8_838_073_512_170_985_897, -3_999_237_033_416_576_341, -2_920_240_395_515_973_663,
    -2_073_249_475_545_404_416, 368_107_899_140_673_753, -6_108_185_202_296_464_250,
    -6_307_735_683_270_494_757, 4_782_583_894_627_718_279, 6_718_292_300_699_989_587,
    8_387_085_186_914_375_220, 3_387_513_132_024_756_289, 4_654_329_375_432_538_231,
    -292_704_475_491_394_206, -3_848_998_599_978_456_535, 7_623_042_350_483_453_954,
    7_725_442_901_813_263_321, 9_186_225_467_561_587_250, -5_132_344_747_257_272_453,
    -6_865_740_430_362_196_008, 2_530_936_820_058_611_833, 1_636_551_876_240_043_639,
    -3_658_707_362_519_810_009, 1_452_244_145_334_316_253, -7_161_729_655_835_084_979,
    -7_943_791_770_359_481_772, 9_108_481_583_171_221_009, -3_200_093_350_120_725_999,
    5_007_630_032_676_973_346, 2_153_168_792_952_589_781, 6_720_334_534_964_750_538,
    -3_181_825_545_719_981_703, 3_433_922_409_283_786_309, 2_285_479_922_797_300_912,
    3_110_614_940_896_576_130, -2_856_812_446_131_932_915, -3_804_580_617_188_639_299,
    7_163_298_419_643_543_757, 4_891_138_053_923_696_990, 580_618_510_277_907_015,
    1_684_034_065_251_686_769, 4_429_514_767_357_295_841, -8_893_025_458_299_325_803,
    -8_103_734_041_042_601_133, 7_177_515_271_653_460_134, 4_589_042_248_470_800_257,
    -1_530_083_407_795_771_245, 143_607_045_258_444_228, 246_994_305_896_273_627,
    -8_356_954_712_051_676_521, 6_473_547_110_565_816_071, 3_092_379_936_208_876_896,
    2_058_427_839_513_754_051, -4_089_587_328_327_907_870, 8_785_882_556_301_281_247,
    -3_074_039_370_013_608_197, -637_529_855_400_303_673, 6_137_678_347_805_511_274,
    -7_152_924_852_417_805_802, 5_708_223_427_705_576_541, -3_223_714_144_396_531_304,
    4_358_391_411_789_012_426, 325_123_008_708_389_849, 6_837_621_693_887_290_924,
    4_843_721_905_315_627_004, -3_212_720_814_705_499_393, -3_825_019_837_890_901_156,
    4_602_025_990_114_250_980, 1_044_646_352_569_048_800, 9_106_614_159_853_161_675,
    -8_394_115_921_626_182_539, -4_304_087_667_751_778_808, 2_681_532_557_646_850_893,
    3_681_559_472_488_511_871, -3_915_372_517_896_561_773, -2_889_241_648_411_946_534,
    -6_564_663_803_938_238_204, -8_060_058_171_802_589_521, 581_945_337_509_520_675,
    3_648_778_920_718_647_903, -4_799_698_790_548_231_394, -7_602_572_252_857_820_065,
    220_828_013_409_515_943, -1_072_987_336_855_386_047, 4_287_360_518_296_753_003,
    -4_633_371_852_008_891_965, 5_513_660_857_261_085_186, -2_258_542_936_462_001_533,
    -8_744_380_348_503_999_773, 8_746_140_185_685_648_781, 228_500_091_334_420_247,
    1_356_187_007_457_302_238, 3_019_253_992_034_194_581, 3_152_601_605_678_500_003,
    -8_793_219_284_148_773_595, 5_559_581_553_696_971_176, 4_916_432_985_369_275_664,
    -8_559_797_105_120_221_417, -5_802_598_197_927_043_732, 2_868_348_622_579_915_573,
    -7_224_052_902_810_357_288, -5_894_682_518_218_493_085, 2_587_672_709_781_371_173,
    -7_706_116_723_325_376_475, 3_092_343_956_317_362_483, -5_561_119_517_847_711_700,
    972_445_599_196_498_113, -1_558_506_600_978_816_441, 1_708_913_533_482_282_562,
    -2_305_554_874_185_907_314, -6_005_743_014_309_462_908, -6_653_329_009_633_068_701,
    -483_583_197_311_151_195, 2_488_075_924_621_352_812, -4_529_369_641_467_339_140,
    -4_663_743_555_056_261_452, 2_997_203_966_153_298_104, 1_282_559_373_026_354_493,
    240_113_143_146_674_385, 8_665_713_329_246_516_443, 628_141_331_766_346_752,
    -4_651_421_219_668_005_332, -7_750_560_848_702_540_400, 7_596_648_026_010_355_826,
    -3_132_152_619_100_351_065, 7_834_161_864_828_164_065, 7_103_445_518_877_254_909,
    4_390_861_237_357_459_201, -4_780_718_172_614_204_074, -319_889_632_007_444_440,
    622_261_699_494_173_647, -3_186_110_786_557_562_560, -8_718_967_088_789_066_690,
    -1_948_156_510_637_662_747, -8_212_195_255_998_774_408, -7_028_621_931_231_314_745,
    2_623_071_828_615_234_808, -4_066_058_308_780_939_700, -5_484_966_924_888_173_764,
    -6_683_604_512_778_046_238, -6_756_087_640_505_506_466, 5_256_026_990_536_851_868,
    7_841_086_888_628_396_109, 6_640_857_538_655_893_162, -8_021_284_697_816_458_310,
    -7_109_857_044_414_059_830, -1_689_021_141_511_844_405, -4_298_087_301_956_291_063,
    -4_077_748_265_377_282_003, -998_231_156_719_803_476, 2_719_520_354_384_050_532,
    9_132_346_697_815_513_771, 4_332_154_495_710_163_773, -2_085_582_442_760_428_892,
    6_994_721_091_344_268_833, -2_556_143_461_985_726_874, -8_567_931_991_128_098_309,
    59_934_747_298_466_858, -3_098_398_008_776_739_403, -265_597_256_199_410_390,
    2_332_206_071_942_466_437, -7_522_315_324_568_406_181, 3_154_897_383_618_636_503,
    -7_585_605_855_467_168_281, -6_762_850_759_087_199_275, 197_309_393_502_684_135,
    -8_579_694_182_469_508_493, 2_543_179_307_861_934_850, 4_350_769_010_207_485_119,
    -4_468_719_947_444_108_136, -7_207_776_534_213_261_296, -1_224_312_577_878_317_200,
    4_287_946_071_480_840_813, 8_362_686_366_770_308_971, 6_486_469_209_321_732_151,
    -5_605_644_191_012_979_782, -1_669_018_511_020_473_564, 4_450_022_655_153_542_367,
    -7_618_176_296_641_240_059, -3_896_357_471_549_267_421, -4_596_796_223_304_447_488,
    -6_531_150_016_257_070_659, -8_982_326_463_137_525_940, -4_125_325_062_227_681_798,
    -1_306_489_741_394_045_544, -8_338_554_946_557_245_229, 5_329_160_409_530_630_596,
    7_790_979_528_857_726_136, 4_955_070_238_059_373_407, -4_304_834_761_432_101_506,
    -6_215_295_852_904_371_179, 3_007_769_226_071_157_901, -6_753_025_801_236_972_788,
    8_928_702_772_696_731_736, 7_856_187_920_214_445_904, -4_748_497_451_462_800_923,
    7_900_176_660_600_710_914, -7_082_800_908_938_549_136, -6_797_926_979_589_575_837,
    -6_737_316_883_512_927_978, 4_186_670_094_382_025_798, 1_883_939_007_446_035_042,
    -414_705_992_779_907_823, 3_734_134_241_178_479_257, 4_065_968_871_360_089_196,
    6_953_124_200_385_847_784, -7_917_685_222_115_876_751, -7_585_632_937_840_318_161,
    -5_567_246_375_906_782_599, -5_256_612_402_221_608_788, 3_106_378_204_088_556_331,
    -2_894_472_214_076_325_998, 4_565_385_105_440_252_958, 1_979_884_289_539_493_806,
    -6_891_578_849_933_910_383, 3_783_206_694_208_922_581, 8_464_961_209_802_336_085,
    2_843_963_751_609_577_687, 3_030_678_195_484_896_323, -4_429_654_462_759_003_204,
    4_459_239_494_808_162_889, 402_587_895_800_087_237, 8_057_891_408_711_167_515,
    4_541_888_170_938_985_079, 1_042_662_272_908_816_815, -3_666_068_979_732_206_850,
    2_647_678_726_283_249_984, 2_144_477_441_549_833_761, -3_417_019_821_499_388_721,
    -2_105_601_033_380_872_185, 5_916_597_177_708_541_638, -8_760_774_321_402_454_447,
    8_833_658_097_025_758_785, 5_970_273_481_425_315_300, 563_813_119_381_731_307,
    -6_455_022_486_202_078_793, 1_598_828_206_250_873_866, -4_016_978_389_451_217_698,
    -2_988_328_551_145_513_985, -6_071_154_634_840_136_312, 8_469_693_267_274_066_490,
    125_672_920_241_807_416, -3_912_292_412_830_714_870, -2_559_617_104_544_284_221,
    -486_523_741_806_024_092, -4_735_332_261_862_713_930, 5_923_302_823_487_327_109,
    -9_082_480_245_771_672_572, -1_808_429_243_461_201_518, 7_990_420_780_896_957_397,
    4_317_817_392_807_076_702, 3_625_184_369_705_367_340, -6_482_649_271_566_653_105,
    -3_480_272_027_152_017_464, -3_225_473_396_345_736_649, -368_878_695_502_291_645,
    -3_981_164_001_421_868_007, -8_522_033_136_963_788_610, 7_609_280_429_197_514_109,
    3_020_985_755_112_334_161, -2_572_049_329_799_262_942, 2_635_195_723_621_160_615,
    5_144_520_864_246_028_816, -8_188_285_521_126_945_980, 1_567_242_097_116_389_047,
    8_172_389_260_191_636_581, -2_885_551_685_425_483_535, -7_060_359_469_858_316_883,
    -6_480_181_133_964_513_127, -7_317_004_403_633_452_381, 6_011_544_915_663_598_137,
    5_932_255_307_352_610_768, 2_241_128_460_406_315_459, -8_327_867_140_638_080_220,
    3_094_483_003_111_372_717, 4_583_857_460_292_963_101, 9_079_887_171_656_594_975,
    -384_082_854_924_064_405, -3_460_631_649_611_717_935, 4_225_072_055_348_026_230,
    -7_385_151_438_465_742_745, 3_801_620_336_801_580_414, -399_845_416_774_701_952,
    -7_446_754_431_269_675_473, 7_899_055_018_877_642_622, 5_421_679_761_463_003_041,
    5_521_102_963_086_275_121, -4_975_092_593_295_409_910, 8_735_487_530_905_098_534,
    -7_462_844_945_281_082_830, -2_080_886_987_197_029_914, -1_000_715_163_927_557_685,
    -4_253_840_471_931_071_485, -5_828_896_094_657_903_328, 6_424_174_453_260_338_141,
    359_248_545_074_932_887, -5_949_720_754_023_045_210, -2_426_265_837_057_637_212,
    3_030_918_217_665_093_212, -9_077_771_202_237_461_772, -3_186_796_180_789_149_575,
    740_416_251_634_527_158, -2_142_944_401_404_840_226, 6_951_781_370_868_335_478,
    399_922_722_363_687_927, -8_928_469_722_407_522_623, -1_378_421_100_515_597_285,
    -8_343_051_178_220_066_766, -3_030_716_356_046_100_229, -8_811_767_350_470_065_420,
    9_026_808_440_365_124_461, 6_440_783_557_497_587_732, 4_615_674_634_722_404_292,
    539_897_290_441_580_544, 2_096_238_225_866_883_852, 8_751_955_639_408_182_687,
    -7_316_147_128_802_486_205, 7_381_039_757_301_768_559, 6_157_238_513_393_239_656,
    -1_473_377_804_940_618_233, 8_629_571_604_380_892_756, 5_280_433_031_239_081_479,
    7_101_611_890_139_813_254, 2_479_018_537_985_767_835, 7_169_176_924_412_769_570,
    -1_281_305_539_061_572_506, -7_865_612_307_799_218_120, 2_278_447_439_451_174_845,
    3_625_338_785_743_880_657, 6_477_479_539_006_708_521, 8_976_185_375_579_272_206,
    -3_712_000_482_142_939_688, 1_326_024_180_520_890_843, 7_537_449_876_596_048_829,
    5_464_680_203_499_696_154, 3_189_671_183_162_196_045, 6_346_751_753_565_857_109,
    -8_982_212_049_534_145_501, -6_127_578_587_196_093_755, -245_039_190_118_465_649,
    -6_320_577_374_581_628_592, 7_208_698_530_190_629_697, 7_276_901_792_339_343_736,
    -7_490_986_807_540_332_668, 4_133_292_154_170_828_382, 2_918_308_698_224_194_548,
    -7_703_910_638_917_631_350, -3_929_437_324_238_184_044, -4_300_543_082_831_323_144,
    -6_344_160_503_358_350_167, 5_896_236_396_443_472_108, -758_328_221_503_023_383,
    -1_894_351_639_983_151_068, -307_900_319_840_287_220, -6_278_469_401_177_312_761,
    -2_171_292_963_361_310_674, 8_382_142_935_188_824_023, 9_103_922_860_780_351_547,
    4_152_330_101_494_654_406,
];
